use std::ops::AddAssign;

/// Search statistic collector.
/// It collects data during A* search.
pub trait SearchStatsCollector {
    /// Called for each node taken from a frontier, can return false to cancel search process.
    #[inline(always)] fn expanded(&mut self) -> bool { true }
    /// Called for each node pushed to a frontier.
    #[inline(always)] fn generated(&mut self) { }
}

/// Search statistic collector that ignore all events.
impl SearchStatsCollector for () {}

/// Counts expanded nodes.
impl SearchStatsCollector for u64 {
    #[inline(always)] fn expanded(&mut self) -> bool { *self += 1; true }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchAllStats {
    pub expanded: u64,
    pub generated: u64
}

impl SearchAllStats {
    pub fn visits(&self) -> u64 { self.expanded + self.generated }
}

impl AddAssign for SearchAllStats {
    fn add_assign(&mut self, rhs: Self) {
        self.expanded += rhs.expanded;
        self.generated += rhs.generated;
    }
}

impl SearchStatsCollector for SearchAllStats {
    #[inline(always)] fn expanded(&mut self) -> bool { self.expanded += 1; true }
    #[inline(always)] fn generated(&mut self) { self.generated += 1; }
}

/// Collector that cancels the search once `limit` nodes have been expanded.
pub struct Limited {
    pub expanded: u64,
    pub generated: u64,
    pub limit: u64
}

impl Limited {
    pub fn with_limit(limit: u64) -> Self { Self{expanded: 0, generated: 0, limit} }

    pub fn visits(&self) -> u64 { self.expanded + self.generated }
}

impl SearchStatsCollector for Limited {
    #[inline(always)] fn expanded(&mut self) -> bool {
        if self.expanded >= self.limit { return false; }
        self.expanded += 1;
        true
    }

    #[inline(always)] fn generated(&mut self) { self.generated += 1; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limited() {
        let mut limited = Limited::with_limit(2);
        assert!(limited.expanded());
        limited.generated();
        assert!(limited.expanded());
        assert!(!limited.expanded());
        assert!(!limited.expanded());
        assert_eq!(limited.visits(), 3);
        assert_eq!(limited.expanded, 2);
    }

    #[test]
    fn test_all_stats_add() {
        let mut total = SearchAllStats::default();
        let mut one = SearchAllStats::default();
        assert!(one.expanded());
        one.generated();
        one.generated();
        total += one;
        total += one;
        assert_eq!(total, SearchAllStats { expanded: 2, generated: 4 });
        assert_eq!(total.visits(), 6);
    }
}
