use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// How many atoms of each element a formula (or part of one) contains.
///
/// Counts are only ever accumulated. Merging two maps sums the counts of the
/// elements they share, and scaling multiplies every count. A symbol that was
/// written with a zero count (`H0`) stays in the map so that it is still
/// looked up when computing a mass.
///
/// Elements are iterated in the order they were first added. Equality
/// ignores that order.
#[derive(Clone, Default)]
pub struct ElementCounts {
    counts: BTreeMap<String, u64>,
    order: Vec<String>,
}

impl ElementCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single element.
    pub fn single(symbol: &str, count: u64) -> Self {
        let mut counts = Self::new();
        counts.add(symbol, count);
        counts
    }

    /// Add `count` atoms of `symbol`.
    pub fn add(&mut self, symbol: &str, count: u64) {
        match self.counts.get_mut(symbol) {
            Some(entry) => *entry = entry.saturating_add(count),
            None => {
                self.counts.insert(symbol.to_string(), count);
                self.order.push(symbol.to_string());
            }
        }
    }

    /// Sum another map into this one.
    pub fn merge(&mut self, other: &ElementCounts) {
        for (symbol, count) in other.iter() {
            self.add(symbol, count);
        }
    }

    /// Merge a whole list of fragments into one map.
    pub fn merge_all<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = ElementCounts>,
    {
        let mut total = Self::new();
        for fragment in fragments {
            total.merge(&fragment);
        }
        total
    }

    /// Multiply every count by `factor`.
    pub fn scale(&mut self, factor: u64) {
        for count in self.counts.values_mut() {
            *count = count.saturating_mul(factor);
        }
    }

    pub fn scaled(mut self, factor: u64) -> Self {
        self.scale(factor);
        self
    }

    pub fn get(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of atoms.
    pub fn total_atoms(&self) -> u64 {
        self.counts.values().fold(0, |acc, n| acc.saturating_add(*n))
    }

    /// Iterate over `(symbol, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.order
            .iter()
            .map(|symbol| (symbol.as_str(), self.counts[symbol]))
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for ElementCounts {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut counts = Self::new();
        for (symbol, count) in iter {
            counts.add(symbol.as_ref(), count);
        }
        counts
    }
}

impl PartialEq for ElementCounts {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for ElementCounts {}

impl Debug for ElementCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Display for ElementCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{")?;
        for (i, (symbol, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", symbol, count)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_accumulates() {
        let mut water = ElementCounts::from_iter([("H", 2), ("O", 1)]);
        water.merge(&ElementCounts::from_iter([("O", 2), ("C", 1)]));
        assert_eq!(water.get("H"), 2);
        assert_eq!(water.get("O"), 3);
        assert_eq!(water.get("C"), 1);
        assert_eq!(water.len(), 3);
    }

    #[test]
    fn test_merge_all() {
        let total = ElementCounts::merge_all(vec![
            ElementCounts::single("Na", 1),
            ElementCounts::single("Cl", 1),
            ElementCounts::single("Na", 2),
        ]);
        assert_eq!(total, ElementCounts::from_iter([("Cl", 1), ("Na", 3)]));
        assert_eq!(total.total_atoms(), 4);
    }

    #[test]
    fn test_scale() {
        let counts = ElementCounts::from_iter([("H", 2), ("O", 1)]).scaled(5);
        assert_eq!(counts.get("H"), 10);
        assert_eq!(counts.get("O"), 5);
    }

    #[test]
    fn test_zero_counts_are_kept() {
        let counts = ElementCounts::single("H", 3).scaled(0);
        assert!(counts.contains("H"));
        assert_eq!(counts.get("H"), 0);
        assert!(!counts.is_empty());
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let mut counts = ElementCounts::single("C", u64::MAX);
        counts.add("C", 1);
        assert_eq!(counts.get("C"), u64::MAX);
        assert_eq!(counts.scaled(2).get("C"), u64::MAX);
    }

    #[test]
    fn test_display() {
        let counts = ElementCounts::from_iter([("O", 1), ("H", 2)]);
        assert_eq!(counts.to_string(), "{O: 1, H: 2}");
        assert_eq!(format!("{:?}", counts), r#"{"O": 1, "H": 2}"#);
    }

    #[test]
    fn test_first_seen_order() {
        let mut counts = ElementCounts::from_iter([("Yy", 1), ("Xx", 1)]);
        counts.merge(&ElementCounts::from_iter([("A", 2), ("Yy", 1)]));
        let symbols: Vec<_> = counts.iter().map(|(symbol, _)| symbol).collect();
        assert_eq!(symbols, vec!["Yy", "Xx", "A"]);
        assert_eq!(counts.get("Yy"), 2);

        // Order does not affect equality.
        assert_eq!(
            ElementCounts::from_iter([("H", 2), ("O", 1)]),
            ElementCounts::from_iter([("O", 1), ("H", 2)])
        );
    }
}
