//! Levenshtein distance and the similarity ratio derived from it.
//!
//! Strings are compared `char` by `char`, so lengths are counted in Unicode
//! scalar values. These functions do not normalize their input; see
//! [`crate::normalize`] for that.
//!
//! ```
//! use speakmatch::distance::levenshtein;
//!
//! assert_eq!(levenshtein::distance("kitten", "sitting"), 3);
//! assert_eq!(levenshtein::similarity("abcd", "abcx"), 0.75);
//! ```

use crate::details::matrix::Matrix;

/// Wagner-Fischer over a full `(len2 + 1) x (len1 + 1)` table. Row `i`
/// belongs to the prefix `s2[..i]` and column `j` to `s1[..j]`.
fn wagner_fischer(s1: &[char], s2: &[char]) -> usize {
    let mut table = Matrix::new(s2.len() + 1, s1.len() + 1, 0_usize);

    for i in 0..table.rows() {
        *table.get_mut(i, 0) = i;
    }
    for j in 0..table.cols() {
        *table.get_mut(0, j) = j;
    }

    for (i, ch2) in s2.iter().enumerate() {
        let row = i + 1;
        for (j, ch1) in s1.iter().enumerate() {
            let col = j + 1;
            let diagonal = *table.get(row - 1, col - 1);

            *table.get_mut(row, col) = if ch1 == ch2 {
                diagonal
            } else {
                let insertion = *table.get(row, col - 1);
                let deletion = *table.get(row - 1, col);
                1 + diagonal.min(insertion).min(deletion)
            };
        }
    }

    *table.get(s2.len(), s1.len())
}

fn ratio(dist: usize, len1: usize, len2: usize) -> f64 {
    let maximum = len1.max(len2);
    if maximum == 0 {
        return 1.0;
    }
    1.0 - dist as f64 / maximum as f64
}

/// Minimum number of single character insertions, deletions and
/// substitutions needed to turn `s1` into `s2`.
///
/// The result is symmetric, `0` for equal strings and never larger than the
/// length of the longer string.
pub fn distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    wagner_fischer(&s1, &s2)
}

/// Similarity ratio `1 - distance / max(len1, len2)` in the range `[0, 1]`.
/// Two empty strings have a similarity of `1`.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    ratio(wagner_fischer(&s1, &s2), s1.len(), s2.len())
}

/// Keeps one string around to compare it against many others, e.g. the
/// expected phrase of a quiz question against every attempt of a learner.
///
/// ```
/// use speakmatch::distance::levenshtein::BatchComparator;
///
/// let expected = BatchComparator::new("entrepreneur");
/// assert_eq!(expected.distance("entreprener"), 1);
/// assert_eq!(expected.distance("entrepreneur"), 0);
/// ```
#[derive(Clone, Debug)]
pub struct BatchComparator {
    s1: Vec<char>,
}

impl BatchComparator {
    pub fn new(s1: &str) -> Self {
        Self {
            s1: s1.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.s1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s1.is_empty()
    }

    pub fn distance(&self, s2: &str) -> usize {
        let s2: Vec<char> = s2.chars().collect();
        wagner_fischer(&self.s1, &s2)
    }

    pub fn similarity(&self, s2: &str) -> f64 {
        let s2: Vec<char> = s2.chars().collect();
        ratio(wagner_fischer(&self.s1, &s2), self.s1.len(), s2.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static EMPTY: &str = "";
    static TEST: &str = "aaaa";
    static NO_SUFFIX: &str = "aaa";
    static NO_SUFFIX2: &str = "aaab";
    static SWAPPED1: &str = "abaa";
    static SWAPPED2: &str = "baaa";
    static REPLACE_ALL: &str = "bbbb";

    macro_rules! assert_delta {
        ($x:expr, $y:expr, $d:expr) => {
            if ($x - $y).abs() > $d {
                panic!("{} is not within {} of {}", $x, $d, $y);
            }
        };
    }

    /// checks symmetry and the batch comparator on every call
    fn test_distance(s1: &str, s2: &str) -> usize {
        let res1 = distance(s1, s2);
        let res2 = distance(s2, s1);
        let res3 = BatchComparator::new(s1).distance(s2);
        let res4 = BatchComparator::new(s2).distance(s1);

        assert_eq!(res1, res2);
        assert_eq!(res1, res3);
        assert_eq!(res1, res4);
        assert!(res1 <= s1.chars().count().max(s2.chars().count()));
        res1
    }

    fn test_similarity(s1: &str, s2: &str) -> f64 {
        let res1 = similarity(s1, s2);
        let res2 = similarity(s2, s1);
        let res3 = BatchComparator::new(s1).similarity(s2);

        assert_delta!(res1, res2, 0.0001);
        assert_delta!(res1, res3, 0.0001);
        assert!((0.0..=1.0).contains(&res1));
        res1
    }

    #[test]
    fn similar() {
        assert_eq!(0, test_distance(EMPTY, EMPTY));
        assert_eq!(0, test_distance(TEST, TEST));
        assert_delta!(1.0, test_similarity(EMPTY, EMPTY), 0.0001);
        assert_delta!(1.0, test_similarity(TEST, TEST), 0.0001);
    }

    #[test]
    fn different() {
        assert_eq!(4, test_distance(TEST, REPLACE_ALL));
        assert_eq!(4, test_distance(TEST, EMPTY));
        assert_eq!(3, test_distance(EMPTY, "abc"));
        assert_delta!(0.0, test_similarity(TEST, REPLACE_ALL), 0.0001);
        assert_delta!(0.0, test_similarity(TEST, EMPTY), 0.0001);
    }

    #[test]
    fn single_edits() {
        assert_eq!(1, test_distance(TEST, NO_SUFFIX));
        assert_eq!(1, test_distance(TEST, NO_SUFFIX2));
        assert_eq!(2, test_distance(SWAPPED1, SWAPPED2));
        assert_delta!(0.75, test_similarity(TEST, NO_SUFFIX), 0.0001);
        assert_delta!(0.5, test_similarity(SWAPPED1, SWAPPED2), 0.0001);
    }

    #[test]
    fn classic_examples() {
        assert_eq!(3, test_distance("kitten", "sitting"));
        assert_eq!(3, test_distance("saturday", "sunday"));
        assert_eq!(1, test_distance("entrepreneur", "entreprener"));
        assert_eq!(3, test_distance("cat", "dog"));
        assert_delta!(1.0 - 1.0 / 12.0, test_similarity("entrepreneur", "entreprener"), 0.0001);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(1, test_distance("école", "ecole"));
        assert_eq!(1, test_distance("über", "uber"));
        assert_delta!(0.8, test_similarity("école", "ecole"), 0.0001);
    }

    #[test]
    fn batch_comparator_len() {
        let scorer = BatchComparator::new("école");
        assert_eq!(scorer.len(), 5);
        assert!(!scorer.is_empty());
        assert!(BatchComparator::new("").is_empty());
    }
}
