#![no_main]

use libfuzzer_sys::fuzz_target;
use speakmatch::normalize::{is_whitespace, normalize};

fuzz_target!(|text: String| {
    let once = normalize(&text);
    assert_eq!(normalize(&once), once);
    assert_eq!(once.trim_matches(is_whitespace), once);
    assert!(!once.split(' ').any(str::is_empty) || once.is_empty());
    assert!(!once.chars().any(|ch| is_whitespace(ch) && ch != ' '));
});
