//! Command implementations
//!
//! One module per user-facing operation. Each attaches its entry point
//! to `Repository`, so the CLI layer only parses arguments and
//! dispatches.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
