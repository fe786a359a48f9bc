//! Status description formatting and parsing.
//!
//! The description attached to a GitHub commit status is the tool's only
//! persisted state. It is formatted for humans but must round-trip back into
//! exact sizes so a later run can recover the baseline:
//!
//! ```text
//! 1,234 bytes                         (no baseline)
//! No change (1,234 bytes)             (baseline equal)
//! +56 bytes (+4.54%) → 1,290 bytes    (baseline differs)
//! ```

pub mod format;
pub mod parse;

pub use format::format_description;
pub use parse::{ParseError, parse_description};
