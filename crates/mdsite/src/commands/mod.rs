//! CLI command implementations.

pub mod api;
pub mod build;
pub mod content;
pub mod init;
pub mod serve;
pub mod theme;
