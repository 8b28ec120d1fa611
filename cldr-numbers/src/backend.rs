use rustc_hash::FxHashMap;

use icu::plurals::PluralCategory;

use crate::number_system::NumberSystem;
use crate::rbnf::RuleSet;
use crate::symbols::{CurrencySpacing, NumberSymbols};

/// One magnitude-range entry of a compact ("short"/"long") format, per
/// `spec.md §4.7`: `[R, {plural_category → [template, zero_count]}]`.
#[derive(Debug, Clone)]
pub struct CompactFormatRule {
    pub magnitude: u64,
    pub templates: FxHashMap<PluralCategory, (String, u32)>,
}

/// The `{0} {1}`-shaped substitution templates `spec.md §9`'s supplemental
/// `to_at_least_string`/`to_at_most_string`/`to_approx_string`/
/// `to_range_string` use.
#[derive(Debug, Clone)]
pub struct MiscPatterns {
    pub at_least: String,
    pub at_most: String,
    pub approximately: String,
    pub range: String,
    /// `:currency_long`'s `[number, currency_name]` substitution pattern.
    pub currency_long: String,
}

impl Default for MiscPatterns {
    fn default() -> Self {
        Self {
            at_least: "{0}+".to_string(),
            at_most: "{0}-".to_string(),
            approximately: "~{0}".to_string(),
            range: "{0}\u{2013}{1}".to_string(),
            currency_long: "{0} {1}".to_string(),
        }
    }
}

/// Locale-derived equivalence classes used for lenient input parsing
/// (`spec.md §4.9`): e.g. every Unicode variant a user might type for `+`.
#[derive(Debug, Clone, Default)]
pub struct LenientParseMaps {
    pub plus: Vec<String>,
    pub minus: Vec<String>,
    pub decimal: Vec<String>,
    pub group: Vec<String>,
    pub percent_sign: Vec<String>,
    pub per_mille_sign: Vec<String>,
}

/// A locale's `otherNumberingSystems` aliases (`spec.md §6`'s `native`/
/// `traditional`/`finance` `number_system` values): each names an entry in
/// the same locale's `number_systems` map, or is absent when the locale
/// defines no alternative for that slot.
#[derive(Debug, Clone, Default)]
pub struct OtherNumberSystems {
    pub native: Option<String>,
    pub traditional: Option<String>,
    pub finance: Option<String>,
}

/// Everything `cldr-numbers` needs from a single resolved locale, per the
/// `LocaleStore` external-collaborator interface in `spec.md §6`.
#[derive(Debug, Clone)]
pub struct LocaleData {
    pub locale_name: String,
    /// Named format string or literal pattern, keyed by format name
    /// (`"standard"`, `"currency"`, `"accounting"`, `"percent"`, ...).
    pub number_formats: FxHashMap<String, String>,
    /// Keyed by number-system name (`"latn"`, `"thai"`, ...).
    pub number_symbols: FxHashMap<String, NumberSymbols>,
    pub number_systems: FxHashMap<String, NumberSystem>,
    pub default_number_system: String,
    pub other_number_systems: OtherNumberSystems,
    pub minimum_grouping_digits: u32,
    pub rbnf: FxHashMap<String, RuleSet>,
    pub lenient_parse_maps: LenientParseMaps,
    pub currency_spacing: CurrencySpacing,
    pub decimal_short: Vec<CompactFormatRule>,
    pub decimal_long: Vec<CompactFormatRule>,
    pub currency_short: Vec<CompactFormatRule>,
    pub misc_patterns: MiscPatterns,
}

impl LocaleData {
    pub fn number_system(&self, name: &str) -> Option<&NumberSystem> {
        self.number_systems.get(name)
    }

    pub fn symbols_for(&self, system: &str) -> Option<&NumberSymbols> {
        self.number_symbols.get(system).or_else(|| self.number_symbols.get("latn"))
    }
}
