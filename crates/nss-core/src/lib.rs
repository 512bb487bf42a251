//! NSS Core Types
//!
//! Leaf types shared by the NSS front end crates:
//!
//! - **Identifiers**: string-interned names ([`identifier::Id`])
//! - **Source text**: script text with a line index ([`source_text::SourceText`])

pub mod identifier;
pub mod source_text;
