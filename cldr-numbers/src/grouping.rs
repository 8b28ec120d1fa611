use cldr_numbers_syntax::GroupSizes;

/// Grouping Engine: `spec.md §4.4`.
///
/// Inserts a sentinel `None` "group separator here" marker into a
/// most-significant-first digit sequence every `first` digits from the
/// right, and every `rest` digits beyond that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedDigit {
    Digit(u8),
    Separator,
}

/// `minimum_grouping_digits` combines the locale default and any explicit
/// `minimum_grouping_digits` option (`spec.md §4.4`, §6).
pub fn group_integer_digits(
    digits: &[u8],
    sizes: GroupSizes,
    minimum_grouping_digits: u32,
) -> Vec<GroupedDigit> {
    if sizes.first == 0 || digits.len() < (sizes.first + minimum_grouping_digits) as usize {
        return digits.iter().map(|&d| GroupedDigit::Digit(d)).collect();
    }

    let mut out = Vec::with_capacity(digits.len() + digits.len() / sizes.first.max(1) as usize);
    let len = digits.len();
    for (i, &d) in digits.iter().enumerate() {
        let distance_from_end = (len - i) as u32;
        if distance_from_end < len as u32 {
            let past_first = distance_from_end > sizes.first;
            let is_boundary = if !past_first {
                distance_from_end == sizes.first
            } else {
                sizes.rest > 0 && (distance_from_end - sizes.first) % sizes.rest == 0
            };
            if is_boundary && i != 0 {
                out.push(GroupedDigit::Separator);
            }
        }
        out.push(GroupedDigit::Digit(d));
    }
    out
}

/// Fractional grouping is the mirror image, counted from the decimal point
/// outward (`spec.md §4.4`); rare in practice (no CLDR standard pattern uses
/// it), but supported for completeness.
pub fn group_fraction_digits(digits: &[u8], sizes: GroupSizes) -> Vec<GroupedDigit> {
    if sizes.first == 0 {
        return digits.iter().map(|&d| GroupedDigit::Digit(d)).collect();
    }
    let mut out = Vec::with_capacity(digits.len());
    for (i, &d) in digits.iter().enumerate() {
        if i != 0 {
            let is_boundary = if i <= sizes.first as usize {
                i == sizes.first as usize
            } else {
                sizes.rest > 0 && (i - sizes.first as usize) % sizes.rest as usize == 0
            };
            if is_boundary {
                out.push(GroupedDigit::Separator);
            }
        }
        out.push(GroupedDigit::Digit(d));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(grouped: &[GroupedDigit]) -> String {
        grouped
            .iter()
            .map(|g| match g {
                GroupedDigit::Digit(d) => d.to_string(),
                GroupedDigit::Separator => ",".to_string(),
            })
            .collect()
    }

    #[test]
    fn groups_thousands() {
        let digits = vec![1, 2, 3, 4, 5];
        let grouped = group_integer_digits(&digits, GroupSizes { first: 3, rest: 3 }, 0);
        assert_eq!(render(&grouped), "12,345");
    }

    #[test]
    fn below_minimum_grouping_digits_suppresses_separators() {
        let digits = vec![1, 2, 3, 4];
        let grouped = group_integer_digits(&digits, GroupSizes { first: 3, rest: 3 }, 2);
        assert_eq!(render(&grouped), "1234");
    }

    #[test]
    fn indian_style_secondary_grouping() {
        let digits = vec![1, 2, 3, 4, 5, 6, 7];
        let grouped = group_integer_digits(&digits, GroupSizes { first: 3, rest: 2 }, 0);
        assert_eq!(render(&grouped), "12,34,567");
    }
}
