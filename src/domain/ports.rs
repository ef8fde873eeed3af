use crate::utils::error::Result;

/// Supplies the OAuth access token. Called once per request, so a host that
/// refreshes tokens out of band is picked up without rebuilding the client.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn user_agent(&self) -> Option<&str> {
        None
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn access_token(&self) -> Result<String> {
        (**self).access_token()
    }
}
