//! # codeviz-error
//!
//! Unified error handling for codeviz.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., InvalidPath, FileRead)
//! - **Error Context**: Assist in locating the cause, usually the offending path
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use codeviz_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidPath, "not a file or directory")
//!         .with_operation("catalog::discover")
//!         .with_context("path", "src/missing"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, codeviz_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using codeviz Error
pub type Result<T> = std::result::Result<T, Error>;
