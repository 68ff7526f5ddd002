//! Top-N process rankings.

use serde::Serialize;

use crate::system::process::ProcessRecord;

/// Maximum number of processes kept in a ranking.
pub const RANK_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RankMetric {
    Ram,
    Cpu,
}

impl RankMetric {
    pub fn title(self) -> &'static str {
        match self {
            RankMetric::Ram => "Top RAM",
            RankMetric::Cpu => "Top CPU",
        }
    }
}

/// Processes ordered descending by one metric, at most `RANK_LIMIT` long.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedView {
    pub metric: RankMetric,
    pub rows: Vec<ProcessRecord>,
}

impl RankedView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pids(&self) -> Vec<u32> {
        self.rows.iter().map(|p| p.pid).collect()
    }
}

pub fn rank_by_ram(records: &[ProcessRecord]) -> RankedView {
    let mut rows = records.to_vec();
    // `sort_by` is stable: equal RSS keeps enumeration order.
    rows.sort_by(|a, b| b.rss_bytes.cmp(&a.rss_bytes));
    rows.truncate(RANK_LIMIT);
    RankedView {
        metric: RankMetric::Ram,
        rows,
    }
}

pub fn rank_by_cpu(records: &[ProcessRecord]) -> RankedView {
    let mut rows = records.to_vec();
    rows.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    rows.truncate(RANK_LIMIT);
    RankedView {
        metric: RankMetric::Cpu,
        rows,
    }
}
