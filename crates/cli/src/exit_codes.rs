//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Description                                    |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | CLI usage error (bad args, missing file)       |
//! | 3    | Reconciliation found mismatches                |
//! | 4    | Invalid config                                 |
//! | 5    | Runtime error (IO, parse)                      |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Reconciliation found mismatches (outside a full match).
/// Like `diff(1)`, a non-zero code means "the documents differ."
pub const EXIT_RECON_MISMATCH: u8 = 3;

/// Config file failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 4;

/// Runtime error: unreadable input, bad JSON/CSV, unwritable output.
pub const EXIT_RECON_RUNTIME: u8 = 5;
