//! Finnish alphabetical ordering for restriction labels.

use std::cmp::Ordering;

/// Primary weight: letters compare case-insensitively, `å ä ö` sort after
/// `z`, and common accented forms fold onto their base letter.
fn weight(c: char) -> u64 {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let z = ('z' as u64) << 2;
    match lower {
        'å' => z + 1,
        'ä' | 'æ' => z + 2,
        'ö' | 'ø' => z + 3,
        'á' | 'à' | 'â' => ('a' as u64) << 2,
        'é' | 'è' | 'ê' => ('e' as u64) << 2,
        'ü' => ('y' as u64) << 2,
        other => (other as u64) << 2,
    }
}

/// Compare two strings in Finnish order: letters first, then lowercase
/// before uppercase, then the raw strings.
pub fn finnish_cmp(a: &str, b: &str) -> Ordering {
    a.chars().map(weight).cmp(b.chars().map(weight))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        words.sort_by(|a, b| finnish_cmp(a, b));
        words
    }

    #[test]
    fn scandinavian_letters_after_z() {
        assert_eq!(
            sorted(&["Öljy", "Ankkuri", "Zeta", "Äänimerkki", "Åland"]),
            vec!["Ankkuri", "Zeta", "Åland", "Äänimerkki", "Öljy"],
        );
    }

    #[test]
    fn case_is_secondary() {
        assert_eq!(finnish_cmp("aallokko", "Aallokko"), Ordering::Less);
        assert_eq!(finnish_cmp("b", "Aa"), Ordering::Greater);
        assert_eq!(finnish_cmp("Kielto", "kielto ohitus"), Ordering::Less);
        assert_eq!(finnish_cmp("sama", "sama"), Ordering::Equal);
    }
}
