use crate::error::PatternSyntaxError;

/// A single lexical unit of a TR35 subpattern. Quote-escaping is resolved
/// here: `'x'` and `''` never reach the parser as anything but `Char`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tok {
    Char(char),
    Digit0,
    DigitHash,
    DigitNonZero(u8),
    DigitAt,
    Comma,
    Dot,
    Exponent,
    PlusSign,
    MinusSign,
    Percent,
    PerMille,
    /// Consecutive `¤` run; the field is the run length (1..=4).
    Currency(usize),
    /// `*` followed by its pad character.
    Pad(char),
}

/// Splits a full pattern (`positive ( ';' negative )?`) into one or two
/// token streams, honoring quote-escaping so an unquoted `;` is the only
/// one treated as the subpattern separator.
pub fn lex_pattern(pattern: &str) -> Result<(Vec<Tok>, Option<Vec<Tok>>), PatternSyntaxError> {
    if pattern.is_empty() {
        return Err(PatternSyntaxError::EmptyPattern);
    }
    let halves = split_unquoted(pattern, ';')?;
    match halves.len() {
        1 => Ok((lex_subpattern(halves[0])?, None)),
        2 => Ok((lex_subpattern(halves[0])?, Some(lex_subpattern(halves[1])?))),
        _ => Err(PatternSyntaxError::TooManySubpatterns),
    }
}

fn split_unquoted(s: &str, sep: char) -> Result<Vec<&str>, PatternSyntaxError> {
    let mut parts = Vec::new();
    let mut in_quote = false;
    let mut start = 0usize;
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\'' {
            in_quote = !in_quote;
        } else if c == sep && !in_quote {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    if in_quote {
        return Err(PatternSyntaxError::UnterminatedQuote(start));
    }
    parts.push(&s[start..]);
    Ok(parts)
}

#[cfg(test)]
pub(crate) fn lex_subpattern_for_tests(s: &str) -> Result<Vec<Tok>, PatternSyntaxError> {
    lex_subpattern(s)
}

pub(crate) fn lex_subpattern(s: &str) -> Result<Vec<Tok>, PatternSyntaxError> {
    let mut toks = Vec::new();
    let mut chars = s.chars().peekable();
    let mut byte_offset = 0usize;
    while let Some(c) = chars.next() {
        let this_offset = byte_offset;
        byte_offset += c.len_utf8();
        match c {
            '\'' => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    byte_offset += 1;
                    toks.push(Tok::Char('\''));
                } else {
                    let mut escaped = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        byte_offset += inner.len_utf8();
                        if inner == '\'' {
                            closed = true;
                            break;
                        }
                        escaped.push(inner);
                    }
                    if !closed {
                        return Err(PatternSyntaxError::UnterminatedQuote(this_offset));
                    }
                    if escaped.is_empty() {
                        toks.push(Tok::Char('\''));
                    } else {
                        toks.extend(escaped.chars().map(Tok::Char));
                    }
                }
            }
            '0' => toks.push(Tok::Digit0),
            '#' => toks.push(Tok::DigitHash),
            '1'..='9' => toks.push(Tok::DigitNonZero(c as u8 - b'0')),
            '@' => toks.push(Tok::DigitAt),
            ',' => toks.push(Tok::Comma),
            '.' => toks.push(Tok::Dot),
            'E' => toks.push(Tok::Exponent),
            '+' => toks.push(Tok::PlusSign),
            '-' => toks.push(Tok::MinusSign),
            '%' => toks.push(Tok::Percent),
            '\u{2030}' => toks.push(Tok::PerMille),
            '\u{00A4}' => {
                let mut run = 1usize;
                while chars.peek() == Some(&'\u{00A4}') {
                    chars.next();
                    byte_offset += '\u{00A4}'.len_utf8();
                    run += 1;
                }
                if run > 4 {
                    return Err(PatternSyntaxError::InvalidCurrencyWidth(run));
                }
                toks.push(Tok::Currency(run));
            }
            '*' => match chars.next() {
                Some(pad_char) => {
                    byte_offset += pad_char.len_utf8();
                    toks.push(Tok::Pad(pad_char));
                }
                None => return Err(PatternSyntaxError::MissingPadChar),
            },
            other => toks.push(Tok::Char(other)),
        }
    }
    Ok(toks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_plain_decimal() {
        let (pos, neg) = lex_pattern("#,##0.00").unwrap();
        assert!(neg.is_none());
        assert_eq!(
            pos,
            vec![
                Tok::DigitHash,
                Tok::Comma,
                Tok::DigitHash,
                Tok::DigitHash,
                Tok::Digit0,
                Tok::Dot,
                Tok::Digit0,
                Tok::Digit0,
            ]
        );
    }

    #[test]
    fn lexes_currency_with_negative_subpattern() {
        let (pos, neg) = lex_pattern("#,##0.00\u{00A4};(#,##0.00\u{00A4})").unwrap();
        assert!(neg.is_some());
        assert!(pos.contains(&Tok::Currency(1)));
    }

    #[test]
    fn resolves_quoted_literal() {
        let toks = lex_subpattern("'#'0").unwrap();
        assert_eq!(toks, vec![Tok::Char('#'), Tok::Digit0]);
    }

    #[test]
    fn doubled_quote_is_literal_apostrophe() {
        let toks = lex_subpattern("''0").unwrap();
        assert_eq!(toks, vec![Tok::Char('\''), Tok::Digit0]);
    }

    #[test]
    fn unterminated_quote_errors() {
        assert_eq!(
            lex_subpattern("'abc"),
            Err(PatternSyntaxError::UnterminatedQuote(0))
        );
    }
}
