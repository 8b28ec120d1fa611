//! Hand-written `LocaleData` tables for the fixture's registered locales.

use rustc_hash::FxHashMap;

use icu::plurals::PluralCategory;

use cldr_numbers::{
    CompactFormatRule, CurrencySpacing, LenientParseMaps, LocaleData, MiscPatterns, NumberSymbols, NumberSystem, NumberSystemKind,
    OtherNumberSystems,
};

use crate::rbnf;

fn digits(codepoints: [char; 10]) -> [String; 10] {
    codepoints.map(|c| c.to_string())
}

fn latn_symbols() -> NumberSymbols {
    NumberSymbols::latin_default()
}

fn base_formats() -> FxHashMap<String, String> {
    let mut m = FxHashMap::default();
    m.insert("standard".to_string(), "#,##0.###".to_string());
    m.insert("currency".to_string(), "\u{A4}#,##0.00".to_string());
    m.insert("accounting".to_string(), "\u{A4}#,##0.00;(\u{A4}#,##0.00)".to_string());
    m.insert("percent".to_string(), "#,##0%".to_string());
    m.insert("permille".to_string(), "#,##0\u{2030}".to_string());
    m.insert("scientific".to_string(), "#E0".to_string());
    m
}

fn empty_compact() -> Vec<CompactFormatRule> {
    Vec::new()
}

fn compact_rule(magnitude: u64, template: &str, zeros: u32) -> CompactFormatRule {
    let mut templates = FxHashMap::default();
    templates.insert(PluralCategory::Other, (template.to_string(), zeros));
    CompactFormatRule { magnitude, templates }
}

fn en() -> LocaleData {
    let mut number_symbols = FxHashMap::default();
    number_symbols.insert("latn".to_string(), latn_symbols());

    let mut number_systems = FxHashMap::default();
    number_systems.insert("latn".to_string(), NumberSystem::latin());
    number_systems.insert(
        "roman".to_string(),
        NumberSystem { name: "roman".to_string(), kind: NumberSystemKind::Algorithmic, digits: None, rule_set: Some("roman-upper".to_string()) },
    );

    let mut rbnf = FxHashMap::default();
    for rule_set in [rbnf::spellout_cardinal_en(), rbnf::digits_ordinal_en(), rbnf::roman_rules(true), rbnf::roman_rules(false)] {
        rbnf.insert(rule_set.name.clone(), rule_set);
    }

    LocaleData {
        locale_name: "en".to_string(),
        number_formats: base_formats(),
        number_symbols,
        number_systems,
        default_number_system: "latn".to_string(),
        other_number_systems: OtherNumberSystems::default(),
        minimum_grouping_digits: 0,
        rbnf,
        lenient_parse_maps: LenientParseMaps {
            plus: vec!["+".to_string(), "\u{FF0B}".to_string()],
            minus: vec!["-".to_string(), "\u{2212}".to_string()],
            decimal: vec![".".to_string()],
            group: vec![",".to_string()],
            percent_sign: vec!["%".to_string()],
            per_mille_sign: vec!["\u{2030}".to_string()],
        },
        currency_spacing: CurrencySpacing::root_default(),
        decimal_short: vec![compact_rule(1_000, "0K", 1), compact_rule(1_000_000, "0M", 1)],
        decimal_long: vec![compact_rule(1_000, "0 thousand", 1), compact_rule(1_000_000, "0 million", 1)],
        currency_short: vec![compact_rule(1_000, "\u{A4}0K", 1), compact_rule(1_000_000, "\u{A4}0M", 1)],
        misc_patterns: MiscPatterns::default(),
    }
}

fn fr() -> LocaleData {
    let mut number_symbols = FxHashMap::default();
    number_symbols.insert(
        "latn".to_string(),
        NumberSymbols {
            decimal: ",".to_string(),
            group: "\u{202F}".to_string(),
            plus: "+".to_string(),
            minus: "-".to_string(),
            percent: "%".to_string(),
            per_mille: "\u{2030}".to_string(),
            exponent: "E".to_string(),
            infinity: "\u{221E}".to_string(),
            nan: "NaN".to_string(),
            superscripting_exponent: "\u{00D7}".to_string(),
        },
    );
    let mut number_systems = FxHashMap::default();
    number_systems.insert("latn".to_string(), NumberSystem::latin());

    LocaleData {
        locale_name: "fr".to_string(),
        number_formats: base_formats(),
        number_symbols,
        number_systems,
        default_number_system: "latn".to_string(),
        other_number_systems: OtherNumberSystems::default(),
        minimum_grouping_digits: 0,
        rbnf: FxHashMap::default(),
        lenient_parse_maps: LenientParseMaps {
            plus: vec!["+".to_string()],
            minus: vec!["-".to_string()],
            decimal: vec![",".to_string()],
            group: vec!["\u{202F}".to_string(), " ".to_string()],
            percent_sign: vec!["%".to_string()],
            per_mille_sign: vec!["\u{2030}".to_string()],
        },
        currency_spacing: CurrencySpacing::root_default(),
        decimal_short: empty_compact(),
        decimal_long: empty_compact(),
        currency_short: empty_compact(),
        misc_patterns: MiscPatterns::default(),
    }
}

fn de() -> LocaleData {
    let mut number_symbols = FxHashMap::default();
    number_symbols.insert(
        "latn".to_string(),
        NumberSymbols { decimal: ",".to_string(), group: ".".to_string(), ..NumberSymbols::latin_default() },
    );
    let mut number_systems = FxHashMap::default();
    number_systems.insert("latn".to_string(), NumberSystem::latin());

    LocaleData {
        locale_name: "de".to_string(),
        number_formats: base_formats(),
        number_symbols,
        number_systems,
        default_number_system: "latn".to_string(),
        other_number_systems: OtherNumberSystems::default(),
        minimum_grouping_digits: 0,
        rbnf: FxHashMap::default(),
        lenient_parse_maps: LenientParseMaps {
            plus: vec!["+".to_string(), "\u{FF0B}".to_string()],
            minus: vec!["-".to_string()],
            decimal: vec![",".to_string()],
            group: vec![".".to_string()],
            percent_sign: vec!["%".to_string()],
            per_mille_sign: vec!["\u{2030}".to_string()],
        },
        currency_spacing: CurrencySpacing::root_default(),
        decimal_short: empty_compact(),
        decimal_long: empty_compact(),
        currency_short: empty_compact(),
        misc_patterns: MiscPatterns::default(),
    }
}

fn es() -> LocaleData {
    let mut number_symbols = FxHashMap::default();
    number_symbols.insert(
        "latn".to_string(),
        NumberSymbols { decimal: ",".to_string(), group: ".".to_string(), ..NumberSymbols::latin_default() },
    );
    let mut number_systems = FxHashMap::default();
    number_systems.insert("latn".to_string(), NumberSystem::latin());

    let mut number_formats = base_formats();
    // Real CLDR `es` embeds a literal no-break space between the amount and
    // the currency symbol rather than relying on the dynamic
    // currency-spacing rule (which only fires for non-symbol currency text).
    number_formats.insert("currency".to_string(), "#,##0.00\u{00A0}\u{A4}".to_string());
    number_formats.insert("accounting".to_string(), "#,##0.00\u{00A0}\u{A4};(#,##0.00\u{00A0}\u{A4})".to_string());

    LocaleData {
        locale_name: "es".to_string(),
        number_formats,
        number_symbols,
        number_systems,
        default_number_system: "latn".to_string(),
        other_number_systems: OtherNumberSystems::default(),
        minimum_grouping_digits: 0,
        rbnf: FxHashMap::default(),
        lenient_parse_maps: LenientParseMaps {
            plus: vec!["+".to_string()],
            minus: vec!["-".to_string()],
            decimal: vec![",".to_string()],
            group: vec![".".to_string()],
            percent_sign: vec!["%".to_string()],
            per_mille_sign: vec!["\u{2030}".to_string()],
        },
        currency_spacing: CurrencySpacing::root_default(),
        decimal_short: empty_compact(),
        decimal_long: empty_compact(),
        currency_short: empty_compact(),
        misc_patterns: MiscPatterns::default(),
    }
}

fn th() -> LocaleData {
    let mut number_symbols = FxHashMap::default();
    number_symbols.insert("latn".to_string(), latn_symbols());

    let mut number_systems = FxHashMap::default();
    number_systems.insert("latn".to_string(), NumberSystem::latin());
    number_systems.insert(
        "thai".to_string(),
        NumberSystem {
            name: "thai".to_string(),
            kind: NumberSystemKind::Numeric,
            digits: Some(digits(['\u{0E50}', '\u{0E51}', '\u{0E52}', '\u{0E53}', '\u{0E54}', '\u{0E55}', '\u{0E56}', '\u{0E57}', '\u{0E58}', '\u{0E59}'])),
            rule_set: None,
        },
    );

    LocaleData {
        locale_name: "th".to_string(),
        number_formats: base_formats(),
        number_symbols,
        number_systems,
        default_number_system: "thai".to_string(),
        other_number_systems: OtherNumberSystems::default(),
        minimum_grouping_digits: 0,
        rbnf: FxHashMap::default(),
        lenient_parse_maps: LenientParseMaps {
            plus: vec!["+".to_string()],
            minus: vec!["-".to_string()],
            decimal: vec![".".to_string()],
            group: vec![",".to_string()],
            percent_sign: vec!["%".to_string()],
            per_mille_sign: vec!["\u{2030}".to_string()],
        },
        currency_spacing: CurrencySpacing::root_default(),
        decimal_short: empty_compact(),
        decimal_long: empty_compact(),
        currency_short: empty_compact(),
        misc_patterns: MiscPatterns::default(),
    }
}

fn ar() -> LocaleData {
    let mut number_symbols = FxHashMap::default();
    number_symbols.insert("latn".to_string(), latn_symbols());
    number_symbols.insert("arab".to_string(), latn_symbols());

    let mut number_systems = FxHashMap::default();
    number_systems.insert("latn".to_string(), NumberSystem::latin());
    number_systems.insert(
        "arab".to_string(),
        NumberSystem {
            name: "arab".to_string(),
            kind: NumberSystemKind::Numeric,
            digits: Some(digits(['\u{0660}', '\u{0661}', '\u{0662}', '\u{0663}', '\u{0664}', '\u{0665}', '\u{0666}', '\u{0667}', '\u{0668}', '\u{0669}'])),
            rule_set: None,
        },
    );
    number_systems.insert(
        "fullwide".to_string(),
        NumberSystem {
            name: "fullwide".to_string(),
            kind: NumberSystemKind::Numeric,
            digits: Some(digits(['\u{FF10}', '\u{FF11}', '\u{FF12}', '\u{FF13}', '\u{FF14}', '\u{FF15}', '\u{FF16}', '\u{FF17}', '\u{FF18}', '\u{FF19}'])),
            rule_set: None,
        },
    );

    LocaleData {
        locale_name: "ar".to_string(),
        number_formats: base_formats(),
        number_symbols,
        number_systems,
        default_number_system: "arab".to_string(),
        // Not a real CLDR alias table; `fullwide` here only exercises the
        // `native`/`traditional`/`finance` dispatch path end to end, the
        // same way `en`'s `roman` entry exercises algorithmic dispatch.
        other_number_systems: OtherNumberSystems { native: None, traditional: None, finance: Some("fullwide".to_string()) },
        minimum_grouping_digits: 0,
        rbnf: FxHashMap::default(),
        lenient_parse_maps: LenientParseMaps {
            plus: vec!["+".to_string()],
            minus: vec!["-".to_string()],
            decimal: vec![".".to_string()],
            group: vec![",".to_string()],
            percent_sign: vec!["%".to_string()],
            per_mille_sign: vec!["\u{2030}".to_string()],
        },
        currency_spacing: CurrencySpacing::root_default(),
        decimal_short: empty_compact(),
        decimal_long: empty_compact(),
        currency_short: empty_compact(),
        misc_patterns: MiscPatterns::default(),
    }
}

pub fn build_all() -> FxHashMap<String, LocaleData> {
    let mut m = FxHashMap::default();
    for data in [en(), fr(), de(), es(), th(), ar()] {
        m.insert(data.locale_name.clone(), data);
    }
    m
}
