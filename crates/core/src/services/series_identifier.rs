use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::series::{SeriesInfo, SeriesKind};

static INSTALLMENT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*)\s\((\d+)/(\d+)\)$").expect("installment tag pattern is valid")
});

static RECURRING_INCOME_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*)\s\(Mês (\d+)/(\d+)\)$").expect("recurring income tag pattern is valid")
});

/// Read series membership out of a stored description.
///
/// Matching is purely syntactic: a hand-typed `"Rent (3/4)"` is
/// indistinguishable from a generated record, and two series created with the
/// same base text look like one. Position and total are returned as written,
/// without checking `1 <= k <= n`; see [`SeriesInfo::is_well_formed`].
pub fn classify(description: &str) -> Option<SeriesInfo> {
    match_tag(&INSTALLMENT_TAG, SeriesKind::Installment, description)
        .or_else(|| match_tag(&RECURRING_INCOME_TAG, SeriesKind::RecurringIncome, description))
}

/// Whether deleting this description should offer the "this and future" choice.
pub fn is_series_member(description: &str) -> bool {
    classify(description).is_some()
}

fn match_tag(pattern: &Regex, kind: SeriesKind, description: &str) -> Option<SeriesInfo> {
    let caps = pattern.captures(description)?;
    // Digit runs too long for u32 are not tags we could have written.
    let position = caps[2].parse().ok()?;
    let total = caps[3].parse().ok()?;
    Some(SeriesInfo {
        kind,
        base: caps[1].to_string(),
        position,
        total,
    })
}

impl SeriesInfo {
    /// `1 <= position <= total`, as every generated tag is.
    pub fn is_well_formed(&self) -> bool {
        self.position >= 1 && self.position <= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_description_is_not_a_series() {
        assert_eq!(classify("Mercado"), None);
        assert_eq!(classify("Mercado (promo)"), None);
        assert_eq!(classify("(1/2)"), None);
    }

    #[test]
    fn nested_parentheses_keep_inner_text_in_base() {
        let info = classify("TV (sala) (1/2)").unwrap();
        assert_eq!(info.base, "TV (sala)");
        assert_eq!((info.position, info.total), (1, 2));
    }

    #[test]
    fn recurring_income_is_recognised() {
        let info = classify("Salário (Mês 3/12)").unwrap();
        assert_eq!(info.kind, SeriesKind::RecurringIncome);
        assert_eq!(info.base, "Salário");
        assert_eq!((info.position, info.total), (3, 12));
    }

    #[test]
    fn overflowing_numbers_are_not_tags() {
        assert_eq!(classify("X (99999999999/2)"), None);
    }

    #[test]
    fn inconsistent_positions_are_still_classified() {
        let info = classify("Rent (5/3)").unwrap();
        assert!(!info.is_well_formed());
    }
}
