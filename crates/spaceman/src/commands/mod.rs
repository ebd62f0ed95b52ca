//! Command implementations for the spaceman CLI

pub mod exec;
pub mod init;
