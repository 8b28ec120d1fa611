//! Hand-written RBNF rule sets backing the fixture's `en` locale:
//! `spellout-cardinal`, `digits-ordinal`, `roman-upper`/`roman-lower`.
//! Each rule set only covers the ranges the fixture's tests actually drive
//! (low thousands); it is not a transcription of CLDR's full `en` RBNF data.

use rustc_hash::FxHashMap;

use icu::plurals::PluralCategory;

use cldr_numbers::{BaseValue, Rule, RuleAccess, RuleArg, RuleCategory, RuleSet, Token};

fn int_rule(value: i64, divisor: u64, definition: Vec<Token>) -> Rule {
    Rule { base_value: BaseValue::Integer(value), range: None, divisor, definition }
}

/// `spellout-cardinal`, `en`: ones/teens as literals, tens/hundreds/thousands
/// built from `Quotient`+`Conditional(Modulo)` recursion into the same rule
/// set, the standard RBNF technique `spec.md §4.8` describes.
pub fn spellout_cardinal_en() -> RuleSet {
    const ONES: [&str; 20] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen",
    ];
    const TENS: [(i64, &str); 8] =
        [(20, "twenty"), (30, "thirty"), (40, "forty"), (50, "fifty"), (60, "sixty"), (70, "seventy"), (80, "eighty"), (90, "ninety")];

    let mut rules: Vec<Rule> = ONES.iter().enumerate().map(|(v, word)| int_rule(v as i64, 1, vec![Token::Literal((*word).to_string())])).collect();

    for (value, word) in TENS {
        rules.push(int_rule(
            value,
            10,
            vec![Token::Literal(word.to_string()), Token::Conditional(vec![Token::Literal("-".to_string()), Token::Modulo(RuleArg::SameRuleSet)])],
        ));
    }

    rules.push(int_rule(
        100,
        100,
        vec![
            Token::Quotient(RuleArg::SameRuleSet),
            Token::Literal(" hundred".to_string()),
            Token::Conditional(vec![Token::Literal(" ".to_string()), Token::Modulo(RuleArg::SameRuleSet)]),
        ],
    ));

    rules.push(int_rule(
        1000,
        1000,
        vec![
            Token::Quotient(RuleArg::SameRuleSet),
            Token::Literal(" thousand".to_string()),
            Token::Conditional(vec![Token::Literal(" ".to_string()), Token::Modulo(RuleArg::SameRuleSet)]),
        ],
    ));

    rules.push(Rule {
        base_value: BaseValue::XDotX,
        range: None,
        divisor: 1,
        definition: vec![
            Token::Quotient(RuleArg::SameRuleSet),
            Token::Literal(" point".to_string()),
            Token::FractionDigits(RuleArg::SameRuleSet),
        ],
    });

    RuleSet { name: "spellout-cardinal".to_string(), access: RuleAccess::Public, category: RuleCategory::Spellout, rules }
}

/// `digits-ordinal`, `en`: renders the plain decimal form of `n` and
/// appends the cardinal-plural-keyed ordinal suffix (`"1st"`, `"2nd"`,
/// `"3rd"`, `"4th"`, ...), the real CLDR technique for "1st/2nd/3rd"-style
/// ordinals — distinct from `spellout-ordinal`'s word form ("first").
pub fn digits_ordinal_en() -> RuleSet {
    let mut suffixes: FxHashMap<PluralCategory, String> = FxHashMap::default();
    suffixes.insert(PluralCategory::One, "st".to_string());
    suffixes.insert(PluralCategory::Two, "nd".to_string());
    suffixes.insert(PluralCategory::Few, "rd".to_string());
    suffixes.insert(PluralCategory::Other, "th".to_string());

    let rules = vec![int_rule(
        0,
        1,
        vec![Token::Call(RuleArg::Format("#,##0".to_string())), Token::OrdinalMap(suffixes)],
    )];

    RuleSet { name: "digits-ordinal".to_string(), access: RuleAccess::Public, category: RuleCategory::Ordinal, rules }
}

/// `roman-upper`/`roman-lower`: one literal rule per value CLDR's own
/// roman-numeral tables enumerate explicitly (`I`/`V`/`X`/`L`/`C`/`D`/`M`
/// and their subtractive forms), composed via the same
/// `Conditional(Modulo)` recursion as the spellout rules.
pub fn roman_rules(upper: bool) -> RuleSet {
    const TABLE: [(i64, &str); 30] = [
        (1, "I"), (2, "II"), (3, "III"), (4, "IV"), (5, "V"), (6, "VI"), (7, "VII"), (8, "VIII"), (9, "IX"),
        (10, "X"), (20, "XX"), (30, "XXX"), (40, "XL"), (50, "L"), (60, "LX"), (70, "LXX"), (80, "LXXX"), (90, "XC"),
        (100, "C"), (200, "CC"), (300, "CCC"), (400, "CD"), (500, "D"), (600, "DC"), (700, "DCC"), (800, "DCCC"), (900, "CM"),
        (1000, "M"), (2000, "MM"), (3000, "MMM"),
    ];

    let mut rules = vec![int_rule(0, 1, vec![Token::Literal(String::new())])];
    for (value, symbol) in TABLE {
        let text = if upper { symbol.to_string() } else { symbol.to_lowercase() };
        rules.push(int_rule(
            value,
            value as u64,
            vec![Token::Literal(text), Token::Conditional(vec![Token::Modulo(RuleArg::SameRuleSet)])],
        ));
    }

    let name = if upper { "roman-upper" } else { "roman-lower" };
    RuleSet { name: name.to_string(), access: RuleAccess::Public, category: RuleCategory::NumberingSystem, rules }
}
