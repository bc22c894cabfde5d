//! Command implementations that do not need a loaded workspace.

pub mod init;
