use thiserror::Error;

/// Raised when a TR35 decimal format pattern cannot be lexed or parsed.
///
/// Compiling a format that is baked into a dispatch table at build time is
/// fatal to that table's construction; compiling a runtime-supplied pattern
/// surfaces this as an ordinary `Result` error instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternSyntaxError {
    #[error("pattern is empty")]
    EmptyPattern,

    #[error("subpattern has no number part")]
    MissingNumberPart,

    #[error("unterminated quote starting at byte {0}")]
    UnterminatedQuote(usize),

    #[error("unexpected character '{0}' in pattern")]
    UnexpectedChar(char),

    #[error("a subpattern may contain at most one decimal point")]
    MultipleDecimalPoints,

    #[error("a subpattern may contain at most one exponent marker")]
    MultipleExponents,

    #[error("'*' pad directive is missing its pad character")]
    MissingPadChar,

    #[error("'@' significant-digit marker cannot follow '#' in the integer part")]
    MisplacedSignificantDigit,

    #[error("a subpattern cannot mix '%' and '\u{2030}'")]
    ConflictingMultiplier,

    #[error("a pattern may contain at most one ';' subpattern separator")]
    TooManySubpatterns,

    #[error("currency placeholder width must be between 1 and 4, got {0}")]
    InvalidCurrencyWidth(usize),
}
