#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use speakmatch::{is_match, is_match_with_threshold, normalize};

#[derive(Arbitrary, Debug)]
pub struct Input {
    pub spoken: String,
    pub expected: String,
    pub threshold: u8,
}

fn fuzz(input: Input) {
    let threshold = f64::from(input.threshold) / 255.0;
    let result = is_match_with_threshold(&input.spoken, &input.expected, threshold);
    assert_eq!(result, is_match_with_threshold(&input.expected, &input.spoken, threshold));
    assert!(is_match(&input.spoken, &input.spoken));

    let spoken = normalize(&input.spoken);
    let expected = normalize(&input.expected);
    if spoken.chars().count() < 3 || expected.chars().count() < 3 {
        assert_eq!(result, spoken == expected);
    }
}

fuzz_target!(|input: Input| {
    fuzz(input);
});
