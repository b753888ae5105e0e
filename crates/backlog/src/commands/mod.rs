//! Standalone command implementations that do not need a loaded backlog.

pub mod init;
