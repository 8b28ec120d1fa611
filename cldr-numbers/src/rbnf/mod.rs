//! Rule-Based Number Format evaluator, per `spec.md §4.8`.
//!
//! This module interprets already-structured `RuleSet`/`Rule`/`Token` data;
//! parsing CLDR's raw RBNF rule-text grammar (`-x:`, `<<`, `>>`, `=%spellout-cardinal=`,
//! ...) is an external `LocaleStore` responsibility, not this crate's.

mod eval;
mod rule;

pub use eval::{eval, RbnfContext};
pub use rule::{BaseValue, Rule, RuleAccess, RuleArg, RuleCategory, RuleSet, Token};
