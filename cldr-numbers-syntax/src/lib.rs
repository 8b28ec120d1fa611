//! Lexer, parser and compiled metadata for TR35 decimal format patterns.
//!
//! This crate is the "Pattern Compiler" component: it turns a pattern
//! string such as `#,##0.00¤;(#,##0.00¤)` into a [`meta::FormatMeta`] plus
//! two ordered operation lists, ready for the formatting pipeline in
//! `cldr-numbers` to execute. It has no knowledge of locales, currencies,
//! or plural rules; it only understands pattern syntax.

mod error;
mod lexer;
mod meta;
mod ops;
mod parser;

pub use error::PatternSyntaxError;
pub use meta::{compile, FormatMeta, FormatOps};
pub use ops::{Op, OpList, PadPosition};
pub use parser::{DigitRange, GroupSizes, Grouping};
