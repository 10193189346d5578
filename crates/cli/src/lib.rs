//! Library half of the `taxcheck` CLI: pipeline composition and output.
//! The binary in `main.rs` only parses arguments and maps errors to exit codes.

pub mod exit_codes;
pub mod export;
pub mod logging;
pub mod pipeline;
