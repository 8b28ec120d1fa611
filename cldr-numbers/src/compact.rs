use icu::plurals::PluralCategory;

use crate::backend::CompactFormatRule;

/// Result of selecting a compact-format entry, per `spec.md §4.7`.
#[derive(Debug, Clone)]
pub struct SelectedCompact {
    pub template: String,
    pub divisor: f64,
}

/// `spec.md §4.7`. Returns `None` when the caller should fall through to the
/// standard format: `|n| < 1000`, `n == 0`, or the matched template is the
/// CLDR "no compact form here" sentinel `"0"`.
pub fn select(
    rules: &[CompactFormatRule],
    n_abs: f64,
    cardinal: impl Fn(f64) -> PluralCategory,
) -> Option<SelectedCompact> {
    if n_abs < 1000.0 || n_abs == 0.0 {
        return None;
    }

    let rule = rules.iter().filter(|r| (r.magnitude as f64) <= n_abs).max_by_key(|r| r.magnitude)?;

    // Tentatively normalize using the smallest zero-count among this
    // magnitude's templates to pick a plural category, then re-resolve the
    // template for that category (all templates at one magnitude share a
    // zero-count in practice, but the category map makes no such promise).
    let probe_zeros = rule.templates.values().next().map(|(_, z)| *z).unwrap_or(1).max(1);
    let probe_divisor = rule.magnitude as f64 / 10f64.powi(probe_zeros as i32 - 1);
    let normalized = n_abs / probe_divisor;
    let category = plural_key_for_normalized(normalized, &cardinal);

    let (template, zeros) = rule
        .templates
        .get(&category)
        .or_else(|| rule.templates.get(&PluralCategory::Other))?
        .clone();

    if template == "0" {
        return None;
    }

    let zeros = zeros.max(1);
    let divisor = rule.magnitude as f64 / 10f64.powi(zeros as i32 - 1);
    Some(SelectedCompact { template, divisor })
}

/// The "exact integer vs rounded" plural-key policy from `spec.md §4.7`,
/// step 3: avoid falsely triggering a CLDR exact-integer plural rule (like
/// `one` for `n == 1`) when the displayed value is merely a rounded
/// approximation of a larger number.
fn plural_key_for_normalized(normalized: f64, cardinal: &impl Fn(f64) -> PluralCategory) -> PluralCategory {
    let rounded = normalized.round();
    if (normalized - rounded).abs() < f64::EPSILON {
        cardinal(rounded)
    } else {
        cardinal(rounded + 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn rule(magnitude: u64, template: &str, zeros: u32) -> CompactFormatRule {
        let mut templates = FxHashMap::default();
        templates.insert(PluralCategory::Other, (template.to_string(), zeros));
        CompactFormatRule { magnitude, templates }
    }

    #[test]
    fn below_threshold_falls_through() {
        let rules = vec![rule(1000, "0K", 1)];
        assert!(select(&rules, 999.0, |_| PluralCategory::Other).is_none());
    }

    #[test]
    fn selects_greatest_matching_magnitude() {
        let rules = vec![rule(1000, "0K", 1), rule(1_000_000, "0M", 1)];
        let selected = select(&rules, 1_500_000.0, |_| PluralCategory::Other).unwrap();
        assert_eq!(selected.template, "0M");
        assert_eq!(selected.divisor, 1_000_000.0);
    }

    #[test]
    fn zero_sentinel_falls_through() {
        let rules = vec![rule(1000, "0", 1)];
        assert!(select(&rules, 1500.0, |_| PluralCategory::Other).is_none());
    }
}
