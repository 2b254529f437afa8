use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compares food names the way a locale-aware sort orders them for display.
///
/// Levels, in order: base letters ignoring case and accents, then accents
/// (unaccented first), then case (lowercase first). Code-point order breaks
/// any remaining tie.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let ka = CollationKey::new(a);
    let kb = CollationKey::new(b);

    ka.primary()
        .cmp(kb.primary())
        .then_with(|| ka.marks.cmp(&kb.marks))
        .then_with(|| case_cmp(&ka.bases, &kb.bases))
        .then_with(|| a.cmp(b))
}

/// Canonically decomposed name split into base characters and the combining
/// marks attached to each.
struct CollationKey {
    bases: Vec<char>,
    marks: Vec<Vec<char>>,
}

impl CollationKey {
    fn new(s: &str) -> Self {
        let mut bases = Vec::new();
        let mut marks: Vec<Vec<char>> = Vec::new();

        for c in s.nfd() {
            if is_combining_mark(c) {
                if let Some(last) = marks.last_mut() {
                    last.push(c);
                    continue;
                }
            }
            bases.push(c);
            marks.push(Vec::new());
        }

        Self { bases, marks }
    }

    fn primary(&self) -> impl Iterator<Item = char> + '_ {
        self.bases.iter().flat_map(|c| c.to_lowercase())
    }
}

fn case_cmp(a: &[char], b: &[char]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_primary_order() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Burger", "appy fizz"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_cmp("pizza", "Pizza"), Ordering::Less);
        assert_eq!(locale_cmp("Pizza", "pizza"), Ordering::Greater);
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(locale_cmp("Samosa", "Samosa"), Ordering::Equal);
        assert_eq!(locale_cmp("", ""), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(locale_cmp("Pav", "Pav Bhaji"), Ordering::Less);
        assert_eq!(locale_cmp("", "Pizza"), Ordering::Less);
    }

    #[test]
    fn test_accented_letters_sort_with_base_letter() {
        assert_eq!(locale_cmp("\u{c9}clair", "Fries"), Ordering::Less);
        assert_eq!(locale_cmp("\u{c9}clair", "Dosa"), Ordering::Greater);
        assert_eq!(locale_cmp("cr\u{e8}me", "crepe"), Ordering::Less);
    }

    #[test]
    fn test_unaccented_before_accented_on_tie() {
        assert_eq!(locale_cmp("cafe", "caf\u{e9}"), Ordering::Less);
        assert_eq!(locale_cmp("caf\u{e9}", "Cafe"), Ordering::Greater);
    }

    #[test]
    fn test_precomposed_and_decomposed_are_equal_up_to_code_points() {
        let precomposed = "caf\u{e9}";
        let decomposed = "cafe\u{301}";
        let ka = CollationKey::new(precomposed);
        let kb = CollationKey::new(decomposed);
        assert_eq!(ka.bases, kb.bases);
        assert_eq!(ka.marks, kb.marks);
    }

    #[test]
    fn test_menu_sort() {
        let mut names = vec![
            "Vada Pav",
            "AmulCool",
            "misal pav",
            "\u{c9}clair",
            "Coca Cola",
            "Appy Fizz",
        ];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(
            names,
            vec![
                "AmulCool",
                "Appy Fizz",
                "Coca Cola",
                "\u{c9}clair",
                "misal pav",
                "Vada Pav"
            ]
        );
    }
}
