//! FILENAME: engine/src/normalize.rs
//! PURPOSE: Accent- and case-insensitive text comparison for Greek input.
//! CONTEXT: Every search box and text filter compares normalized strings,
//! so "Κώστας", "ΚΩΣΤΑΣ" and "κωστας" are all the same needle.

/// Maps an accented (or final-form) Greek letter to its plain base letter.
/// Characters outside the table pass through unchanged.
fn strip_accent(c: char) -> char {
    match c {
        'ά' => 'α',
        'έ' => 'ε',
        'ή' => 'η',
        'ί' | 'ϊ' | 'ΐ' => 'ι',
        'ό' => 'ο',
        'ύ' | 'ϋ' | 'ΰ' => 'υ',
        'ώ' => 'ω',
        'Ά' => 'Α',
        'Έ' => 'Ε',
        'Ή' => 'Η',
        'Ί' | 'Ϊ' => 'Ι',
        'Ό' => 'Ο',
        'Ύ' | 'Ϋ' => 'Υ',
        'Ώ' => 'Ω',
        // Word-final sigma folds to the medial form
        'ς' => 'σ',
        other => other,
    }
}

/// Removes Greek accents without changing case.
/// "Κώστας" -> "Κωστασ"
pub fn strip_accents(text: &str) -> String {
    text.chars().map(strip_accent).collect()
}

/// Lower-cases and strips accents. Pure and idempotent.
/// "Κώστας" -> "κωστασ"
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    strip_accents(&text.to_lowercase())
}

/// Accent/case-insensitive substring test.
/// Returns false when either side is empty or the haystack is absent.
pub fn matches(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) if !h.is_empty() && !needle.is_empty() => normalize(h).contains(&normalize(needle)),
        _ => false,
    }
}

/// Accent/case-insensitive prefix test. An absent field reads as "".
pub fn starts_with(haystack: Option<&str>, prefix: &str) -> bool {
    normalize(haystack.unwrap_or("")).starts_with(&normalize(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_case_and_accents() {
        assert_eq!(normalize("Κώστας"), "κωστασ");
        assert_eq!(normalize("ΆΈΉΊΌΎΏ"), "αεηιουω");
        assert_eq!(normalize("ϊϋΐΰ"), "ιυιυ");
        assert_eq!(normalize("Hello World"), "hello world");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["Παπαδόπουλος", "ΓΙΏΡΓΟΣ", "Ελένη-Μαρία", "abc 123", "", "Ϊ"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn test_matches_accent_insensitive() {
        assert!(matches(Some("Παπαδόπουλος"), "παπαδοπουλοσ"));
        assert!(matches(Some("Παπαδόπουλος"), "ΠΑΠΑΔ"));
        assert!(matches(Some("6971234567"), "1234"));
        assert!(!matches(Some("Νικολάου"), "γιωργ"));
    }

    #[test]
    fn test_matches_empty_sides() {
        assert!(!matches(Some("Παπαδόπουλος"), ""));
        assert!(!matches(Some(""), "π"));
        assert!(!matches(None, "π"));
        assert!(!matches(Some(""), ""));
    }

    #[test]
    fn test_strip_accents_keeps_case() {
        assert_eq!(strip_accents("Κώστας"), "Κωστασ");
        assert_eq!(strip_accents("Άρης"), "Αρησ");
    }

    #[test]
    fn test_starts_with() {
        assert!(starts_with(Some("Παπαδόπουλος"), "παπα"));
        assert!(!starts_with(Some("Παπαδόπουλος"), "δοπ"));
        assert!(starts_with(None, ""));
        assert!(!starts_with(None, "α"));
    }
}
