//! Severity classification service.
//!
//! Holds the threshold table and meme corpus, both loaded once at startup
//! and shared read-only for the life of the process.

use rand::Rng;
use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{MemeCorpus, ThresholdTable, Tier};

/// Outcome of classifying one notional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Selected severity tier.
    pub tier: Tier,
    /// Corpus index of the chosen flavor line.
    pub line_index: usize,
    /// The chosen flavor line.
    pub flavor: &'a str,
}

/// Maps notional values to tiers and flavor lines.
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    thresholds: ThresholdTable,
    corpus: MemeCorpus,
}

impl SeverityClassifier {
    #[must_use]
    pub fn new(thresholds: ThresholdTable, corpus: MemeCorpus) -> Self {
        if corpus.len() < thresholds.len() {
            warn!(
                corpus = corpus.len(),
                tiers = thresholds.len(),
                "Corpus has fewer lines than tiers; some tiers share lines"
            );
        }
        Self { thresholds, corpus }
    }

    #[must_use]
    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    #[must_use]
    pub fn corpus(&self) -> &MemeCorpus {
        &self.corpus
    }

    /// Lines available to each tier.
    #[must_use]
    pub fn slice_size(&self) -> usize {
        self.corpus.slice_size(self.thresholds.len())
    }

    #[must_use]
    pub fn classify(&self, notional: Decimal) -> Tier {
        self.thresholds.classify(notional)
    }

    /// Classify a value and draw a flavor line for its tier.
    pub fn assess<R: Rng + ?Sized>(&self, notional: Decimal, rng: &mut R) -> Classification<'_> {
        let tier = self.classify(notional);
        let line_index = self.corpus.pick_index(tier, self.thresholds.len(), rng);
        let flavor = self.corpus.line(line_index).unwrap_or_default();

        Classification {
            tier,
            line_index,
            flavor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn classifier() -> SeverityClassifier {
        let thresholds =
            ThresholdTable::try_new(vec![dec!(0), dec!(1000), dec!(1000000)]).unwrap();
        let corpus = MemeCorpus::try_new((0..9).map(|i| format!("meme {i}")).collect()).unwrap();
        SeverityClassifier::new(thresholds, corpus)
    }

    #[test]
    fn assess_draws_from_tier_slice() {
        let classifier = classifier();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let result = classifier.assess(dec!(500000), &mut rng);
            assert_eq!(result.tier.index(), 1);
            assert!((3..6).contains(&result.line_index));
            assert_eq!(result.flavor, format!("meme {}", result.line_index));
        }
    }

    #[test]
    fn assess_top_tier() {
        let classifier = classifier();
        let mut rng = StdRng::seed_from_u64(5);

        let result = classifier.assess(dec!(2000000), &mut rng);
        assert_eq!(result.tier.intensity(), 3);
        assert!((6..9).contains(&result.line_index));
    }

    #[test]
    fn slice_size_uses_table_length() {
        assert_eq!(classifier().slice_size(), 3);
    }
}
