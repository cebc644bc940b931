//! CLI Exit Code Registry
//!
//! Single source of truth for `detgrid` exit codes. Scripts piping
//! `detgrid random` into `detgrid eval` rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 2    | Usage error (bad arguments, size out of range)     |
//! | 3    | I/O error (unreadable file or stdin, write failed) |
//! | 4    | Input could not be parsed as CSV                   |
//! | 5    | Matrix shape error (empty, not square, too large)  |
//! | 6    | Terminal could not be set up for the grid UI       |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments.
pub const EXIT_USAGE: u8 = 2;

/// Reading input or writing output failed.
pub const EXIT_IO: u8 = 3;

/// CSV input was malformed.
pub const EXIT_PARSE: u8 = 4;

/// Input parsed but is not a usable square matrix.
pub const EXIT_SHAPE: u8 = 5;

/// Raw mode, alternate screen or drawing failed.
pub const EXIT_TERMINAL: u8 = 6;
