use rustc_hash::FxHashMap;

use icu::plurals::PluralCategory;

use crate::error::CldrNumberError;

use super::rule::{BaseValue, Rule, RuleArg, RuleSet, Token};

/// The cooperating collaborators the RBNF interpreter needs to recurse
/// into other rule sets, select plural categories, and re-enter the
/// decimal pipeline for embedded `{:format, fmt}` tokens, per `spec.md §9`'s
/// "RBNF evaluator and decimal pipeline as cooperating pure functions"
/// design note.
pub struct RbnfContext<'a> {
    pub rule_sets: &'a FxHashMap<String, RuleSet>,
    pub cardinal: &'a dyn Fn(f64) -> PluralCategory,
    pub ordinal: &'a dyn Fn(f64) -> PluralCategory,
    pub format_embedded: &'a dyn Fn(f64, &str) -> Result<String, CldrNumberError>,
    pub locale_name: &'a str,
}

/// Evaluates `rule_set_name` against `n`, per `spec.md §4.8`.
pub fn eval(ctx: &RbnfContext, rule_set_name: &str, n: f64) -> Result<String, CldrNumberError> {
    if n.is_nan() || n.is_infinite() {
        return Err(CldrNumberError::RbnfUnsupported(if n.is_nan() { "NaN".into() } else { "Infinity".into() }));
    }
    let rule_set = ctx.rule_sets.get(rule_set_name).ok_or_else(|| CldrNumberError::RbnfNoRuleSet {
        locale: ctx.locale_name.to_string(),
        rule_set: rule_set_name.to_string(),
    })?;
    eval_rule_set(ctx, rule_set, n)
}

fn eval_rule_set(ctx: &RbnfContext, rule_set: &RuleSet, n: f64) -> Result<String, CldrNumberError> {
    let rule = select_rule(rule_set, n)?;
    eval_rule(ctx, rule_set, rule, n)
}

/// Rule selection per `spec.md §4.8`:
/// 1. `n < 0` and a `-x` rule exists → use it.
/// 2. `n` fractional and an `x.x` rule exists → use it.
/// 3. Otherwise the greatest integer `base_value ≤ n` among integer rules.
fn select_rule<'a>(rule_set: &'a RuleSet, n: f64) -> Result<&'a Rule, CldrNumberError> {
    if n < 0.0 {
        if let Some(r) = rule_set.negative_rule() {
            return Ok(r);
        }
    }
    if n.fract() != 0.0 {
        if let Some(r) = rule_set.fractional_rule() {
            return Ok(r);
        }
    }
    let n_floor = n.trunc() as i64;
    rule_set
        .integer_rules()
        .filter(|r| r.integer_value().map(|v| v <= n_floor).unwrap_or(false))
        .max_by_key(|r| r.integer_value().unwrap())
        .ok_or_else(|| CldrNumberError::RbnfNoRuleForNumber {
            rule_set: rule_set.name.clone(),
            value: n.to_string(),
        })
}

fn eval_rule(ctx: &RbnfContext, rule_set: &RuleSet, rule: &Rule, n: f64) -> Result<String, CldrNumberError> {
    let divisor = rule.divisor.max(1) as f64;
    let mut out = String::new();
    eval_tokens(ctx, rule_set, &rule.definition, n, divisor, &mut out)?;
    Ok(out)
}

fn eval_tokens(
    ctx: &RbnfContext,
    rule_set: &RuleSet,
    tokens: &[Token],
    n: f64,
    divisor: f64,
    out: &mut String,
) -> Result<(), CldrNumberError> {
    for tok in tokens {
        eval_token(ctx, rule_set, tok, n, divisor, out)?;
    }
    Ok(())
}

fn eval_token(
    ctx: &RbnfContext,
    rule_set: &RuleSet,
    tok: &Token,
    n: f64,
    divisor: f64,
    out: &mut String,
) -> Result<(), CldrNumberError> {
    match tok {
        Token::Literal(s) => out.push_str(s),
        Token::Modulo(arg) => {
            let m = n - (n / divisor).trunc() * divisor;
            out.push_str(&dispatch(ctx, rule_set, arg, m)?);
        }
        Token::Quotient(arg) => {
            let q = (n / divisor).trunc();
            out.push_str(&dispatch(ctx, rule_set, arg, q)?);
        }
        Token::Call(arg) => {
            out.push_str(&dispatch(ctx, rule_set, arg, n)?);
        }
        Token::OrdinalMap(map) => {
            let cat = (ctx.ordinal)(n);
            let text = map.get(&cat).or_else(|| map.get(&PluralCategory::Other));
            if let Some(t) = text {
                out.push_str(t);
            }
        }
        Token::CardinalMap(map) => {
            let cat = (ctx.cardinal)(n);
            let text = map.get(&cat).or_else(|| map.get(&PluralCategory::Other));
            if let Some(t) = text {
                out.push_str(t);
            }
        }
        Token::Conditional(sub) => {
            let m = n - (n / divisor).trunc() * divisor;
            if m > 0.0 {
                eval_tokens(ctx, rule_set, sub, n, divisor, out)?;
            }
        }
        Token::FractionDigits(arg) => {
            let mut first = true;
            for digit in fractional_digit_string(n).chars().filter_map(|c| c.to_digit(10)) {
                if !first {
                    out.push(' ');
                }
                first = false;
                out.push_str(&dispatch(ctx, rule_set, arg, digit as f64)?);
            }
        }
    }
    Ok(())
}

/// Digit-string extraction of `n`'s fractional part, per `spec.md §4.8`'s
/// "fractional rule handling": trailing zeros are dropped so `12.50`
/// expands to a single digit (`"5"`), not two.
fn fractional_digit_string(n: f64) -> String {
    let rendered = format!("{:.9}", n.fract().abs());
    match rendered.split_once('.') {
        Some((_, frac)) => frac.trim_end_matches('0').to_string(),
        None => String::new(),
    }
}

fn dispatch(ctx: &RbnfContext, rule_set: &RuleSet, arg: &RuleArg, value: f64) -> Result<String, CldrNumberError> {
    match arg {
        RuleArg::SameRuleSet => eval_rule_set(ctx, rule_set, value),
        RuleArg::Rule(name) => eval(ctx, name, value),
        RuleArg::Format(fmt) => (ctx.format_embedded)(value, fmt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_cardinal(rules: Vec<Rule>) -> RuleSet {
        RuleSet {
            name: "spellout-cardinal".into(),
            access: super::super::rule::RuleAccess::Public,
            category: super::super::rule::RuleCategory::Spellout,
            rules,
        }
    }

    #[test]
    fn selects_greatest_base_value_not_exceeding_n() {
        let rules = vec![
            Rule { base_value: BaseValue::Integer(0), range: None, divisor: 1, definition: vec![Token::Literal("zero".into())] },
            Rule { base_value: BaseValue::Integer(1), range: None, divisor: 1, definition: vec![Token::Literal("one".into())] },
            Rule { base_value: BaseValue::Integer(2), range: None, divisor: 1, definition: vec![Token::Literal("two".into())] },
        ];
        let rule_set = toy_cardinal(rules);
        let mut map = FxHashMap::default();
        map.insert("spellout-cardinal".to_string(), rule_set);
        let ctx = RbnfContext {
            rule_sets: &map,
            cardinal: &|_| PluralCategory::Other,
            ordinal: &|_| PluralCategory::Other,
            format_embedded: &|_, _| Ok(String::new()),
            locale_name: "en",
        };
        assert_eq!(eval(&ctx, "spellout-cardinal", 1.0).unwrap(), "one");
        assert_eq!(eval(&ctx, "spellout-cardinal", 2.0).unwrap(), "two");
    }

    #[test]
    fn fractional_rule_spells_digits_after_integer_part() {
        let rules = vec![
            Rule { base_value: BaseValue::Integer(0), range: None, divisor: 1, definition: vec![Token::Literal("zero".into())] },
            Rule { base_value: BaseValue::Integer(1), range: None, divisor: 1, definition: vec![Token::Literal("one".into())] },
            Rule { base_value: BaseValue::Integer(5), range: None, divisor: 1, definition: vec![Token::Literal("five".into())] },
            Rule { base_value: BaseValue::Integer(6), range: None, divisor: 1, definition: vec![Token::Literal("six".into())] },
            Rule {
                base_value: BaseValue::XDotX,
                range: None,
                divisor: 1,
                definition: vec![
                    Token::Quotient(RuleArg::SameRuleSet),
                    Token::Literal(" point".into()),
                    Token::FractionDigits(RuleArg::SameRuleSet),
                ],
            },
        ];
        let rule_set = toy_cardinal(rules);
        let mut map = FxHashMap::default();
        map.insert("spellout-cardinal".to_string(), rule_set);
        let ctx = RbnfContext {
            rule_sets: &map,
            cardinal: &|_| PluralCategory::Other,
            ordinal: &|_| PluralCategory::Other,
            format_embedded: &|_, _| Ok(String::new()),
            locale_name: "en",
        };
        assert_eq!(eval(&ctx, "spellout-cardinal", 1.56).unwrap(), "one point five six");
    }

    #[test]
    fn missing_rule_set_errors() {
        let map = FxHashMap::default();
        let ctx = RbnfContext {
            rule_sets: &map,
            cardinal: &|_| PluralCategory::Other,
            ordinal: &|_| PluralCategory::Other,
            format_embedded: &|_, _| Ok(String::new()),
            locale_name: "en",
        };
        assert!(matches!(eval(&ctx, "nope", 1.0), Err(CldrNumberError::RbnfNoRuleSet { .. })));
    }
}
