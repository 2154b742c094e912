//! Score cutoffs for similarity scores.
//!
//! A match threshold is a [`WithScoreCutoff`]: it turns a raw similarity into
//! `Some(score)` when the score reaches the cutoff and `None` otherwise.

use std::fmt::Debug;

#[derive(Default, Copy, Clone, Debug, PartialEq)]
pub struct WithScoreCutoff<T>(pub T);

/// Cutoff for metrics where higher is better. A similarity passes when it is
/// `>=` the cutoff.
pub trait SimilarityCutoff<T>
where
    T: Copy,
{
    type Output: Copy + Into<Option<T>> + PartialEq + Debug;

    fn score(&self, raw: T) -> Self::Output;
}

impl<T> SimilarityCutoff<T> for WithScoreCutoff<T>
where
    T: Copy + PartialOrd + Debug,
{
    type Output = Option<T>;

    fn score(&self, raw: T) -> Self::Output {
        (raw >= self.0).then_some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_cutoff() {
        assert_eq!(WithScoreCutoff(0.5_f64).score(0.5), Some(0.5));
        assert_eq!(WithScoreCutoff(0.5_f64).score(0.4), None);
        // NaN never passes a cutoff
        assert_eq!(WithScoreCutoff(f64::NAN).score(1.0), None);
    }
}
