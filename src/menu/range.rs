/// Closed interval `[start, end]` over display indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Endpoints may come in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Overlapping or directly adjacent
    pub fn touches(&self, other: &Range) -> bool {
        self.start <= other.end.saturating_add(1) && other.start <= self.end.saturating_add(1)
    }

    fn union(&self, other: &Range) -> Range {
        Range {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Sorted set of ranges where no two members overlap or touch.
///
/// Inserting absorbs every member the new range touches, so a range that
/// bridges two neighbours collapses all three into one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<Range>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair up indices as `(a, b)` endpoints; an odd tail becomes `(last, last)`
    pub fn from_endpoints(indices: &[usize]) -> Self {
        let mut set = Self::new();
        for pair in indices.chunks(2) {
            let a = pair[0];
            let b = pair.get(1).copied().unwrap_or(a);
            set.insert(Range::new(a, b));
        }
        set
    }

    pub fn insert(&mut self, range: Range) {
        let mut merged = range;
        self.ranges.retain(|existing| {
            if existing.touches(&merged) {
                merged = merged.union(existing);
                false
            } else {
                true
            }
        });
        // fixed point: nothing left may touch the merged range
        while let Some(i) = self.ranges.iter().position(|r| r.touches(&merged)) {
            merged = merged.union(&self.ranges.remove(i));
        }
        let at = self.ranges.partition_point(|r| r.start < merged.start);
        self.ranges.insert(at, merged);
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
