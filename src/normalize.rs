//! Text canonicalization applied before two answers are compared.
//!
//! ```
//! use speakmatch::normalize;
//!
//! assert_eq!(normalize("  Hello,   World!!  "), "hello world");
//! assert_eq!(normalize("\"Bite the bullet\" (idiom)"), "bite the bullet idiom");
//! ```

/// Characters removed during normalization. Other symbols (`-`, `&`, digits,
/// ...) are kept.
pub const PUNCTUATION: [char; 14] = [
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}',
];

#[inline]
pub fn is_punctuation(ch: char) -> bool {
    PUNCTUATION.contains(&ch)
}

/// Whitespace as understood by ECMAScript (`\s`, `String.prototype.trim`),
/// which transcripts and question data are produced with. It differs from
/// [`char::is_whitespace`] in two characters: U+FEFF (byte order mark) is
/// whitespace, U+0085 (next line) is not.
#[inline]
pub fn is_whitespace(ch: char) -> bool {
    match ch {
        '\u{feff}' => true,
        '\u{0085}' => false,
        _ => ch.is_whitespace(),
    }
}

/// Lowercases `text`, removes [`PUNCTUATION`], trims it and collapses every
/// run of [whitespace](is_whitespace) into a single ASCII space.
///
/// The result never starts or ends with whitespace and never contains two
/// whitespace characters in a row. Normalizing twice gives the same result as
/// normalizing once.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|&ch| !is_punctuation(ch))
        .collect();

    let mut result = String::with_capacity(stripped.len());
    for word in stripped.split(is_whitespace).filter(|word| !word.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_and_punctuation() {
        assert_eq!(normalize("Entrepreneur!"), "entrepreneur");
        assert_eq!(normalize("  Hello,   World!!  "), "hello world");
        assert_eq!(normalize("[a]{b}(c);:'\"?"), "abc");
    }

    #[test]
    fn keeps_other_symbols() {
        assert_eq!(normalize("Rock-and-Roll & 42"), "rock-and-roll & 42");
    }

    #[test]
    fn collapses_any_whitespace() {
        assert_eq!(normalize("\ta \n\n b\r\n"), "a b");
        assert_eq!(normalize("one\u{3000}two"), "one two");
    }

    #[test]
    fn empty_results() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!..."), "");
        // punctuation between words leaves a single space
        assert_eq!(normalize("yes , no"), "yes no");
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert_eq!(normalize("hello\u{feff}"), "hello");
        assert_eq!(normalize("\u{feff}Hello\u{feff}\u{feff}world"), "hello world");
    }

    #[test]
    fn next_line_is_not_whitespace() {
        assert_eq!(normalize("a\u{0085}b"), "a\u{0085}b");
        assert_eq!(normalize(" a\u{0085} "), "a\u{0085}");
        assert!(!is_whitespace('\u{0085}'));
        assert!(is_whitespace('\u{a0}'));
    }

    #[test]
    fn unicode_letters() {
        assert_eq!(normalize("ÉCOLE Über"), "école über");
    }

    #[test]
    fn idempotent() {
        for text in [
            "",
            "  Hello,   World!!  ",
            "To 'bite the bullet' means:",
            "If I _____ known earlier, I would have told you.",
            "ÉCOLE\t\tÜber",
        ] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn never_longer_than_input() {
        for text in ["ABC", "  a  b  ", "What do you think?", ""] {
            assert!(normalize(text).chars().count() <= text.chars().count());
        }
    }
}
