pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod git;
pub mod logging;
pub mod progress;
pub mod release;
pub mod ui;
pub mod version;
pub mod workflow;

pub use error::{Result, VersionManagerError};
