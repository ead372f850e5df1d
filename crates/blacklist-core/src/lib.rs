pub mod config;
pub mod error;
pub mod logging;

pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod table;

pub use error::{BlacklistError, Result};
