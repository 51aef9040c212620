//! Meme corpus and flavor-line selection.
//!
//! The corpus is split into contiguous slices, one per severity tier, each
//! `round(corpus_len / tier_count)` lines long. A flavor line is drawn
//! uniformly from the slice of the selected tier. When rounding pushes the
//! last slice past the end of the corpus the index is clamped to the last
//! line.

use rand::Rng;
use tracing::debug;

use super::error::DomainError;
use super::severity::Tier;

/// Ordered collection of flavor lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeCorpus {
    lines: Vec<String>,
}

impl MemeCorpus {
    /// Build a corpus from non-empty lines.
    pub fn try_new(lines: Vec<String>) -> Result<Self, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::EmptyCorpus);
        }
        Ok(Self { lines })
    }

    /// Parse one line per entry, skipping blank lines.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let lines = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self::try_new(lines)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Lines per tier: `corpus_len / tier_count` rounded half up, at least 1.
    #[must_use]
    pub fn slice_size(&self, tier_count: usize) -> usize {
        let tier_count = tier_count.max(1);
        let rounded = (2 * self.lines.len() + tier_count) / (2 * tier_count);
        rounded.max(1)
    }

    /// Index range `[start, start + slice_size)` of a tier's slice, unclamped.
    #[must_use]
    pub fn slice_bounds(&self, tier: Tier, tier_count: usize) -> (usize, usize) {
        let size = self.slice_size(tier_count);
        let start = tier.index() * size;
        (start, start + size)
    }

    /// Pick a line index for a tier, clamped to the corpus.
    pub fn pick_index<R: Rng + ?Sized>(&self, tier: Tier, tier_count: usize, rng: &mut R) -> usize {
        let (start, end) = self.slice_bounds(tier, tier_count);
        let index = rng.gen_range(start..end);
        let last = self.lines.len() - 1;

        if index > last {
            debug!(
                tier = tier.index(),
                index,
                clamped = last,
                "Flavor line index past end of corpus"
            );
            last
        } else {
            index
        }
    }

    /// Draw a flavor line for a tier.
    pub fn pick<R: Rng + ?Sized>(&self, tier: Tier, tier_count: usize, rng: &mut R) -> &str {
        let index = self.pick_index(tier, tier_count, rng);
        &self.lines[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corpus(n: usize) -> MemeCorpus {
        MemeCorpus::try_new((0..n).map(|i| format!("line {i}")).collect()).unwrap()
    }

    #[test]
    fn slice_size_rounds_half_up() {
        assert_eq!(corpus(9).slice_size(3), 3);
        assert_eq!(corpus(10).slice_size(4), 3);
        assert_eq!(corpus(9).slice_size(4), 2);
        assert_eq!(corpus(11).slice_size(6), 2);
        assert_eq!(corpus(1).slice_size(6), 1);
    }

    #[test]
    fn picks_stay_within_tier_slice() {
        let corpus = corpus(9);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let index = corpus.pick_index(Tier::new(1), 3, &mut rng);
            assert!((3..6).contains(&index), "index {index} outside tier 1");
        }
    }

    #[test]
    fn picks_are_roughly_uniform() {
        let corpus = corpus(9);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        let trials = 9_000;

        for _ in 0..trials {
            let index = corpus.pick_index(Tier::new(2), 3, &mut rng);
            counts[index - 6] += 1;
        }

        for count in counts {
            let share = count as f64 / trials as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.03, "share {share} not uniform");
        }
    }

    #[test]
    fn overshooting_last_slice_is_clamped() {
        // 10 lines over 4 tiers: slice size 3, last slice covers 9..12.
        let corpus = corpus(10);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let index = corpus.pick_index(Tier::new(3), 4, &mut rng);
            assert!((9..10).contains(&index));
        }
        assert_eq!(corpus.pick(Tier::new(3), 4, &mut rng), "line 9");
    }

    #[test]
    fn corpus_smaller_than_table_still_picks() {
        let corpus = corpus(2);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(corpus.pick_index(Tier::new(0), 6, &mut rng), 0);
        assert_eq!(corpus.pick_index(Tier::new(5), 6, &mut rng), 1);
    }

    #[test]
    fn parse_skips_blank_lines() {
        let corpus = MemeCorpus::parse("gm\n\nngmi  \n   \n").unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.line(1), Some("ngmi"));
    }

    #[test]
    fn rejects_empty_corpus() {
        assert_eq!(MemeCorpus::parse("\n\n"), Err(DomainError::EmptyCorpus));
    }
}
