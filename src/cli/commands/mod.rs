//! Command implementations

pub mod config;
pub mod import;
pub mod template;
