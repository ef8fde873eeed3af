pub mod client;
pub mod operation;
pub mod options;

pub use crate::domain::model::{ResponsePayload, SelectOption};
pub use crate::domain::ports::{ConfigProvider, TokenSource};
pub use crate::utils::error::Result;
