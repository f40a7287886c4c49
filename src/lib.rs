pub mod boundary;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod git;
pub mod logger;
pub mod resolver;
pub mod template;
pub mod ui;

pub use error::{Result, VerinfoError};
