//! Locale-aware title ordering (English collation).
//!
//! Three comparison levels, as in the default English collation tables:
//!
//! 1. **Primary**: base characters. Whitespace sorts before punctuation and
//!    symbols, which sort before digits, which sort before letters. Letters
//!    compare case- and accent-insensitively.
//! 2. **Secondary**: unaccented before accented.
//! 3. **Tertiary**: lower case before upper case.
//!
//! Strings equal at every level compare [`Ordering::Equal`], so a stable
//! sort keeps their original order.

use std::cmp::Ordering;

/// Coarse character class, in collation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Space,
    Punct,
    Digit,
    Letter,
}

#[derive(Debug, Clone, Copy)]
struct Weight {
    class: Class,
    base: char,
    accented: bool,
    upper: bool,
}

fn weigh(ch: char) -> Weight {
    let upper = ch.is_uppercase();
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    let (base, accented) = strip_accent(lower);
    let class = if ch.is_whitespace() {
        Class::Space
    } else if ch.is_numeric() {
        Class::Digit
    } else if ch.is_alphabetic() {
        Class::Letter
    } else {
        Class::Punct
    };
    Weight {
        class,
        base,
        accented,
        upper,
    }
}

/// Fold common Latin accented letters onto their base letter.
fn strip_accent(ch: char) -> (char, bool) {
    let base = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ś' | 'š' => 's',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return (ch, false),
    };
    (base, true)
}

/// Compare two titles.
pub fn compare(a: &str, b: &str) -> Ordering {
    let wa: Vec<Weight> = a.chars().map(weigh).collect();
    let wb: Vec<Weight> = b.chars().map(weigh).collect();

    let primary = wa
        .iter()
        .map(|w| (w.class, w.base))
        .cmp(wb.iter().map(|w| (w.class, w.base)));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = wa
        .iter()
        .map(|w| w.accented)
        .cmp(wb.iter().map(|w| w.accented));
    if secondary != Ordering::Equal {
        return secondary;
    }

    wa.iter().map(|w| w.upper).cmp(wb.iter().map(|w| w.upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(titles: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = titles.iter().map(ToString::to_string).collect();
        v.sort_by(|a, b| compare(a, b));
        v
    }

    #[test]
    fn case_insensitive_primary_order() {
        assert_eq!(sorted(&["Zebra", "apple", "Banana"]), ["apple", "Banana", "Zebra"]);
    }

    #[test]
    fn lower_case_before_upper_case_on_tie() {
        assert_eq!(compare("apple", "Apple"), Ordering::Less);
        assert_eq!(compare("Apple", "apple"), Ordering::Greater);
    }

    #[test]
    fn accents_are_secondary() {
        assert_eq!(sorted(&["resume", "résumé", "rest"]), ["rest", "resume", "résumé"]);
        assert_eq!(compare("cote", "côte"), Ordering::Less);
    }

    #[test]
    fn punctuation_before_digits_before_letters() {
        assert_eq!(sorted(&["a1", "ab", "a-", "a b"]), ["a b", "a-", "a1", "ab"]);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare("Use", "Use Hooks"), Ordering::Less);
    }

    #[test]
    fn digits_compare_character_wise() {
        assert_eq!(compare("10 rules", "9 rules"), Ordering::Less);
    }

    #[test]
    fn identical_titles_are_equal() {
        assert_eq!(compare("Same", "Same"), Ordering::Equal);
    }

    #[test]
    fn stable_sort_keeps_duplicates_in_input_order() {
        let mut items = vec![("Same", 1), ("Alpha", 2), ("Same", 3)];
        items.sort_by(|a, b| compare(a.0, b.0));
        assert_eq!(items, [("Alpha", 2), ("Same", 1), ("Same", 3)]);
    }
}
