//! Name ordering for Arabic product names.
//!
//! Product names are mostly Arabic, so plain code-point order puts hamza'd
//! alefs after every other letter and lets short vowel marks change the order.
//! The collation key used here folds those differences away:
//!
//! - tashkeel (U+064B..=U+065F, U+0670) and tatweel (U+0640) are dropped
//! - أ إ آ ٱ fold to ا, ة folds to ه, ى folds to ي
//! - everything else is lowercased
//!
//! Names with equal keys are ordered by their raw text so the order is total.

use core::cmp::Ordering;

fn is_ignorable(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}')
}

fn fold(c: char) -> char {
    match c {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        'ة' => 'ه',
        'ى' => 'ي',
        other => other,
    }
}

/// Iterator over the collation key of `s`.
fn key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(|c| !is_ignorable(*c))
        .map(fold)
        .flat_map(char::to_lowercase)
}

/// Compare two names for display ordering.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    key(a).cmp(key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamza_alef_sorts_with_bare_alef() {
        // By code point أ (U+0623) precedes ا (U+0627), which would put
        // "أحمر" before "ابيض" regardless of the second letter.
        let mut names = vec!["بشت", "أحمر", "ابيض"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["ابيض", "أحمر", "بشت"]);
    }

    #[test]
    fn test_diacritics_do_not_change_order() {
        // Damma (U+064F) sorts after every letter by code point.
        let mut names = vec!["بشت", "بُرقع"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["بُرقع", "بشت"]);
    }

    #[test]
    fn test_teh_marbuta_and_alef_maksura_fold() {
        assert_eq!(key("عباءة").collect::<String>(), "عباءه");
        assert_eq!(key("كرسى").collect::<String>(), "كرسي");
    }

    #[test]
    fn test_latin_is_case_insensitive() {
        let mut names = vec!["b", "A", "a"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["A", "a", "b"]);
    }

    #[test]
    fn test_order_is_total() {
        assert_eq!(compare_names("غترة", "غترة"), Ordering::Equal);
        assert_ne!(compare_names("غترة", "غتره"), Ordering::Equal);
    }
}
