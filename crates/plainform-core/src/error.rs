//! Error types for JSON parsing.
//!
//! Only the JSON engine can fail: a single malformed token anywhere in the
//! input aborts the whole parse, with no recovery or skip-and-continue. CSV
//! parsing is total — malformed numbers degrade to string cells instead of
//! erroring — so the CSV engine never produces these.

use thiserror::Error;

/// Errors raised by the JSON parser. All failures are synchronous and fatal
/// for the parse that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A numeric-looking token failed both its 32-bit and 64-bit parse.
    #[error("malformed number {token:?}")]
    MalformedNumber { token: String },

    /// Input ended before the closing `"` of a string.
    #[error("unterminated string")]
    UnterminatedString,

    /// Input ended before the matching closer of a `{` or `[`.
    #[error("unterminated container opened with {open:?}")]
    UnterminatedContainer { open: char },

    /// A value was expected but the input was exhausted.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A value was expected but the next character starts no known token.
    #[error("unexpected character {found:?}")]
    UnexpectedCharacter { found: char },
}

/// Convenience alias used throughout plainform-core.
pub type Result<T> = std::result::Result<T, ParseError>;
