#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use speakmatch::distance::levenshtein;

#[derive(Arbitrary, Debug)]
pub struct Texts {
    pub s1: String,
    pub s2: String,
}

fn fuzz(texts: Texts) {
    let dist = levenshtein::distance(&texts.s1, &texts.s2);
    assert_eq!(dist, levenshtein::distance(&texts.s2, &texts.s1));
    assert_eq!(dist, levenshtein::BatchComparator::new(&texts.s1).distance(&texts.s2));
    assert!(dist <= texts.s1.chars().count().max(texts.s2.chars().count()));
    assert_eq!(levenshtein::distance(&texts.s1, &texts.s1), 0);

    let sim = levenshtein::similarity(&texts.s1, &texts.s2);
    assert!((0.0..=1.0).contains(&sim));
}

fuzz_target!(|texts: Texts| {
    fuzz(texts);
});
