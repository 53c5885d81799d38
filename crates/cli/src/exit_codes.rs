//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `jdhub` exit codes.
//! Import scripts branch on them, so a code never changes meaning.
//!
//! | Code | Constant                 | Triggered by                                  |
//! |------|--------------------------|-----------------------------------------------|
//! | 0    | `EXIT_SUCCESS`           | Command completed; every row valid            |
//! | 1    | `EXIT_ERROR`             | Unclassified failure                          |
//! | 2    | `EXIT_USAGE`             | Bad arguments, no reference snapshot given    |
//! | 3    | `EXIT_INVALID_ROWS`      | `review` found at least one invalid row       |
//! | 4    | `EXIT_INPUT_UNREADABLE`  | Import sheet missing, unsupported or empty    |
//! | 5    | `EXIT_REFERENCE_INVALID` | Snapshot unreadable or fails index checks     |
//! | 6    | `EXIT_NOTHING_TO_COMMIT` | `commit` with zero valid rows                 |
//! | 7    | `EXIT_COMMIT_FAILED`     | Payload could not be written                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant with the next free number
//! 2. Document what triggers it
//! 3. Update the table above and `ALL_CODES`
//! 4. Wire it into the relevant command's error handling

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code on its own parse failures.
pub const EXIT_USAGE: u8 = 2;

/// Review completed but some rows failed validation.
/// The report is still printed (and written with `--csv`).
pub const EXIT_INVALID_ROWS: u8 = 3;

/// The import sheet could not be read or has no data rows.
pub const EXIT_INPUT_UNREADABLE: u8 = 4;

/// The reference snapshot is unreadable, malformed, or has duplicate
/// names or teams pointing at unknown departments.
pub const EXIT_REFERENCE_INVALID: u8 = 5;

/// `commit` found no valid rows; no payload was written.
pub const EXIT_NOTHING_TO_COMMIT: u8 = 6;

/// The storage step failed; nothing is partially written.
pub const EXIT_COMMIT_FAILED: u8 = 7;

#[cfg(test)]
pub const ALL_CODES: &[(&str, u8)] = &[
    ("EXIT_SUCCESS", EXIT_SUCCESS),
    ("EXIT_ERROR", EXIT_ERROR),
    ("EXIT_USAGE", EXIT_USAGE),
    ("EXIT_INVALID_ROWS", EXIT_INVALID_ROWS),
    ("EXIT_INPUT_UNREADABLE", EXIT_INPUT_UNREADABLE),
    ("EXIT_REFERENCE_INVALID", EXIT_REFERENCE_INVALID),
    ("EXIT_NOTHING_TO_COMMIT", EXIT_NOTHING_TO_COMMIT),
    ("EXIT_COMMIT_FAILED", EXIT_COMMIT_FAILED),
];
