/// A single formatting instruction in a compiled subpattern's operation list.
///
/// `Quote`/quoted-character tokens from the grammar have no distinct runtime
/// behavior from an ordinary literal, so the compiler folds them into
/// `Literal` at compile time rather than carrying them as separate tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Literal(String),
    FormatNumber,
    /// Width 1..=4: symbol, ISO code, plural long name, narrow symbol.
    Currency(u8),
    Plus,
    Minus,
    Percent,
    Permille,
    Pad,
}

pub type OpList = Vec<Op>;

/// Where the pad directive's fill character is inserted relative to the
/// subpattern's literal affixes, per the `*`'s position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadPosition {
    BeforePrefix,
    #[default]
    AfterPrefix,
    BeforeSuffix,
    AfterSuffix,
}
