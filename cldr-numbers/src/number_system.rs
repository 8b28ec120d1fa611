/// `{name, kind, digits?, rules?}` per `spec.md §3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberSystemKind {
    /// Carries a 10-grapheme digit string, e.g. `latn`, `thai`, `arab`.
    Numeric,
    /// Delegates to a named RBNF rule set, e.g. `roman`, `hebr`, `hanidec`.
    Algorithmic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSystem {
    pub name: String,
    pub kind: NumberSystemKind,
    /// Present iff `kind == Numeric`; exactly 10 graphemes, `0..=9`.
    pub digits: Option<[String; 10]>,
    /// Present iff `kind == Algorithmic`; names the RBNF rule set to use.
    pub rule_set: Option<String>,
}

impl NumberSystem {
    pub fn latin() -> Self {
        Self {
            name: "latn".to_string(),
            kind: NumberSystemKind::Numeric,
            digits: Some([
                "0".into(), "1".into(), "2".into(), "3".into(), "4".into(),
                "5".into(), "6".into(), "7".into(), "8".into(), "9".into(),
            ]),
            rule_set: None,
        }
    }

    pub fn is_algorithmic(&self) -> bool {
        self.kind == NumberSystemKind::Algorithmic
    }

    /// Whether this system's digits are Latin `0-9` — the short-circuit
    /// case for the transliterator (`spec.md §4.6`).
    pub fn is_latin_digits(&self) -> bool {
        matches!(&self.digits, Some(d) if d.iter().zip("0123456789".chars()).all(|(g, c)| g == &c.to_string()))
    }

    pub fn digit(&self, value: u8) -> Option<&str> {
        self.digits.as_ref().and_then(|d| d.get(value as usize)).map(String::as_str)
    }
}

/// A "type" of number system requested via the `number_system` option
/// before it is resolved to a concrete name for a locale (`spec.md §6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberSystemRequest {
    Default,
    Native,
    Traditional,
    Finance,
    Named,
}
