//! Resume match analyzer library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;

pub use config::Config;
pub use error::{AnalyzerError, Result};
