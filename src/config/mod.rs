//! Configuration

pub(crate) mod defaults;
mod load;
mod types;

pub use load::FrontConfig;
pub use types::{GeneralConfig, HandshakeConfig, LogLevel};
