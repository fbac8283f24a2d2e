pub mod config;
pub mod error;
pub mod types;

pub use config::ArtdxConfig;
pub use error::{ArtdxError, Result};
pub use types::*;
