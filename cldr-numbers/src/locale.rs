use std::str::FromStr;

use icu::locid::Locale;

use crate::error::CldrNumberError;

/// `cf` u-extension override: `:standard` or `:account` currency format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyFormatPref {
    Standard,
    Account,
}

/// The subset of BCP-47 `u`-extension keywords this pipeline understands,
/// per `spec.md §3` and `§6`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UExtensions {
    /// `u-nu-*`: number system override.
    pub number_system: Option<String>,
    /// `u-cu-*`: currency override.
    pub currency: Option<String>,
    /// `u-cf-*`: currency format override.
    pub currency_format: Option<CurrencyFormatPref>,
}

/// `(language, script?, territory?, variants, extensions)` per BCP-47, with
/// the CLDR/RBNF locale names this core needs resolved eagerly, per
/// `spec.md §3`.
#[derive(Debug, Clone)]
pub struct LocaleId {
    pub locale: Locale,
    pub cldr_locale_name: String,
    pub rbnf_locale_name: Option<String>,
    pub extensions: UExtensions,
}

impl LocaleId {
    pub fn parse(name: &str) -> Result<Self, CldrNumberError> {
        let locale = Locale::from_str(name)
            .map_err(|_| CldrNumberError::InvalidLanguage(name.to_string()))?;
        let extensions = parse_u_extension(name);
        let full = locale.to_string();
        let cldr_locale_name = match full.to_ascii_lowercase().find("-u-") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        Ok(Self { locale, cldr_locale_name, rbnf_locale_name: None, extensions })
    }

    pub fn language(&self) -> String {
        self.locale.id.language.to_string()
    }

    /// `root`/`und` is the fallback locale for RBNF and algorithmic number
    /// systems per `spec.md §4.8`.
    pub fn root() -> Self {
        Self {
            locale: Locale::from_str("und").expect("und is a valid locale id"),
            cldr_locale_name: "root".to_string(),
            rbnf_locale_name: Some("root".to_string()),
            extensions: UExtensions::default(),
        }
    }
}

fn parse_u_extension(raw: &str) -> UExtensions {
    let lower = raw.to_ascii_lowercase();
    let mut ext = UExtensions::default();
    let Some(idx) = lower.find("-u-") else {
        return ext;
    };
    let toks: Vec<&str> = lower[idx + 3..].split('-').collect();
    let mut i = 0;
    while i < toks.len() {
        match toks[i] {
            "nu" if i + 1 < toks.len() => {
                ext.number_system = Some(toks[i + 1].to_string());
                i += 2;
            }
            "cu" if i + 1 < toks.len() => {
                ext.currency = Some(toks[i + 1].to_uppercase());
                i += 2;
            }
            "cf" if i + 1 < toks.len() => {
                ext.currency_format = match toks[i + 1] {
                    "account" => Some(CurrencyFormatPref::Account),
                    "standard" => Some(CurrencyFormatPref::Standard),
                    _ => None,
                };
                i += 2;
            }
            _ => i += 1,
        }
    }
    ext
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_locale() {
        let loc = LocaleId::parse("fr-CA").unwrap();
        assert_eq!(loc.cldr_locale_name, "fr-CA");
        assert!(loc.extensions.number_system.is_none());
    }

    #[test]
    fn parses_nu_extension() {
        let loc = LocaleId::parse("th-u-nu-thai").unwrap();
        assert_eq!(loc.extensions.number_system.as_deref(), Some("thai"));
        assert_eq!(loc.cldr_locale_name, "th");
    }

    #[test]
    fn parses_cf_extension() {
        let loc = LocaleId::parse("de-u-cf-account").unwrap();
        assert_eq!(loc.extensions.currency_format, Some(CurrencyFormatPref::Account));
    }
}
