//! Severity tiers.
//!
//! A [`ThresholdTable`] maps a notional value onto a discrete [`Tier`]. The
//! selected tier is the highest index whose threshold the value strictly
//! exceeds; index 0 is the floor and is returned when nothing above it is
//! exceeded.
//!
//! # Examples
//!
//! ```
//! use rust_decimal_macros::dec;
//! use srekt::domain::severity::ThresholdTable;
//!
//! let table = ThresholdTable::try_new(vec![dec!(0), dec!(1000), dec!(1000000)]).unwrap();
//! let tier = table.classify(dec!(500000));
//!
//! assert_eq!(tier.index(), 1);
//! assert_eq!(tier.intensity(), 2);
//! ```

use rust_decimal::Decimal;

use super::error::DomainError;

/// Ascending list of notional thresholds, one per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdTable {
    thresholds: Vec<Decimal>,
}

impl ThresholdTable {
    /// Build a table, rejecting empty or descending input.
    pub fn try_new(thresholds: Vec<Decimal>) -> Result<Self, DomainError> {
        if thresholds.is_empty() {
            return Err(DomainError::EmptyThresholds);
        }

        if let Some(index) = thresholds.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(DomainError::UnorderedThresholds {
                index: index + 1,
                value: thresholds[index + 1],
                previous: thresholds[index],
            });
        }

        Ok(Self { thresholds })
    }

    /// Parse one threshold per line. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut thresholds = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cleaned = line.replace('_', "");
            let value = cleaned
                .parse::<Decimal>()
                .map_err(|_| DomainError::InvalidThreshold {
                    line: number + 1,
                    text: line.to_string(),
                })?;
            thresholds.push(value);
        }
        Self::try_new(thresholds)
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Always false for a constructed table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    #[must_use]
    pub fn thresholds(&self) -> &[Decimal] {
        &self.thresholds
    }

    /// Pick the tier for a notional value.
    ///
    /// A value equal to a threshold does not exceed it.
    #[must_use]
    pub fn classify(&self, notional: Decimal) -> Tier {
        let index = (1..self.thresholds.len())
            .rev()
            .find(|&i| self.thresholds[i] < notional)
            .unwrap_or(0);
        Tier { index }
    }
}

/// A severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier {
    index: usize,
}

impl Tier {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// How many times the severity marker is repeated.
    #[must_use]
    pub const fn intensity(self) -> usize {
        self.index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> ThresholdTable {
        ThresholdTable::try_new(vec![dec!(0), dec!(1000), dec!(1000000)]).unwrap()
    }

    #[test]
    fn classify_picks_highest_exceeded_threshold() {
        let table = table();
        assert_eq!(table.classify(dec!(500000)).index(), 1);
        assert_eq!(table.classify(dec!(5000000)).index(), 2);
        assert_eq!(table.classify(dec!(10)).index(), 0);
        assert_eq!(table.classify(dec!(0)).index(), 0);
    }

    #[test]
    fn threshold_equality_does_not_exceed() {
        let table = table();
        assert_eq!(table.classify(dec!(1000)).index(), 0);
        assert_eq!(table.classify(dec!(1000.000001)).index(), 1);
        assert_eq!(table.classify(dec!(1000000)).index(), 1);
        assert_eq!(table.classify(dec!(1000000.01)).index(), 2);
    }

    #[test]
    fn classify_is_monotonic() {
        let table = ThresholdTable::try_new(vec![
            dec!(0),
            dec!(100000),
            dec!(1000000),
            dec!(10000000),
            dec!(100000000),
            dec!(1000000000),
        ])
        .unwrap();

        let mut previous = table.classify(Decimal::ZERO);
        let mut value = dec!(1);
        while value < dec!(100000000000) {
            let tier = table.classify(value);
            assert!(tier >= previous, "tier decreased at {value}");
            previous = tier;
            value *= dec!(3);
        }
        assert_eq!(previous.index(), 5);
    }

    #[test]
    fn intensity_counts_tiers_crossed() {
        assert_eq!(Tier::new(0).intensity(), 1);
        assert_eq!(table().classify(dec!(500000)).intensity(), 2);
    }

    #[test]
    fn single_entry_table_always_returns_floor() {
        let table = ThresholdTable::try_new(vec![dec!(100)]).unwrap();
        assert_eq!(table.classify(dec!(1000000)).index(), 0);
    }

    #[test]
    fn duplicate_thresholds_are_allowed() {
        let table = ThresholdTable::try_new(vec![dec!(0), dec!(10), dec!(10)]).unwrap();
        assert_eq!(table.classify(dec!(11)).index(), 2);
        assert_eq!(table.classify(dec!(10)).index(), 0);
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(
            ThresholdTable::try_new(vec![]),
            Err(DomainError::EmptyThresholds)
        );
    }

    #[test]
    fn rejects_descending_table() {
        let result = ThresholdTable::try_new(vec![dec!(0), dec!(10), dec!(5)]);
        assert!(matches!(
            result,
            Err(DomainError::UnorderedThresholds { index: 2, .. })
        ));
    }

    #[test]
    fn parse_skips_blanks_and_comments() {
        let table = ThresholdTable::parse("# tiers\n0\n\n100_000\n 1000000 \n").unwrap();
        assert_eq!(
            table.thresholds(),
            &[dec!(0), dec!(100000), dec!(1000000)]
        );
    }

    #[test]
    fn parse_reports_bad_line() {
        let result = ThresholdTable::parse("0\nlots\n");
        assert_eq!(
            result,
            Err(DomainError::InvalidThreshold {
                line: 2,
                text: "lots".into()
            })
        );
    }
}
