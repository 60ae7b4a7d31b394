use crate::models::series::SeriesKind;

/// `"{base} ({k}/{n})"`
pub fn tag_installment(base: &str, position: u32, total: u32) -> String {
    tag(SeriesKind::Installment, base, position, total)
}

/// `"{base} (Mês {k}/{n})"`
pub fn tag_recurring_income(base: &str, position: u32, total: u32) -> String {
    tag(SeriesKind::RecurringIncome, base, position, total)
}

/// Append the series tag for `kind`. Callers guarantee `1 <= position <= total`.
pub fn tag(kind: SeriesKind, base: &str, position: u32, total: u32) -> String {
    debug_assert!(position >= 1 && position <= total);
    format!("{base} ({}{position}/{total})", kind.tag_prefix())
}

/// The text every tag of `kind` for `base` starts with: `"{base} ("` or
/// `"{base} (Mês "`.
pub fn tag_opening(kind: SeriesKind, base: &str) -> String {
    format!("{base} ({}", kind.tag_prefix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installment_tag() {
        assert_eq!(tag_installment("Notebook", 2, 10), "Notebook (2/10)");
    }

    #[test]
    fn recurring_income_tag() {
        assert_eq!(tag_recurring_income("Salário", 1, 12), "Salário (Mês 1/12)");
    }

    #[test]
    fn base_is_kept_verbatim() {
        assert_eq!(tag_installment("TV (sala)", 1, 2), "TV (sala) (1/2)");
    }
}
