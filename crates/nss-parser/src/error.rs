//! Error and diagnostic system for the NSS parser.
//!
//! This module provides:
//! - Stable diagnostic ids with error codes for documentation and searchability
//! - Severity levels
//! - A diagnostic bag that accumulates diagnostics in insertion order
//! - [`ParseError`] for callers that want a `Result`-shaped outcome
//!
//! Neither the lexer nor the parser ever fails outright: every problem they
//! find becomes a [`Diagnostic`] and the front end keeps going.
//!
//! # Example
//!
//! ```
//! # use nss_parser::error::{Diagnostic, DiagnosticId};
//! # use nss_parser::Span;
//!
//! let diag = Diagnostic::new(DiagnosticId::TokenExpected, Span::new(10..11))
//!     .with_arg(")")
//!     .with_help("close the parenthesized condition");
//! assert_eq!(diag.to_string(), "error[E106]: expected `)`");
//! ```

mod collector;
mod diagnostic;
mod diagnostic_id;
mod parse_error;
mod severity;

pub use collector::DiagnosticBag;
pub use diagnostic::Diagnostic;
pub use diagnostic_id::DiagnosticId;
pub use parse_error::ParseError;
pub use severity::Severity;
