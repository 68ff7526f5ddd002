use std::time::Duration;

use serde::Serialize;

use super::process::ProcessRecord;
use super::provider::{InterfaceStats, MemoryStats, MetricsProvider, NetCounters};
use crate::error::MetricError;

/// Everything sampled in one tick. `None` marks a metric that could not be read.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MetricsSnapshot {
    pub cpu_percent: Option<f32>,
    pub memory: Option<MemoryStats>,
    pub network: Option<NetCounters>,
    pub interfaces: Vec<InterfaceStats>,
    pub uptime: Option<Duration>,
    pub processes: Vec<ProcessRecord>,
}

/// Which interfaces are listed on the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InterfaceFilter {
    #[default]
    All,
    /// Only interfaces whose operational state is up. Without an operstate
    /// source, an interface with at least one bound address counts as up.
    Up,
}

impl InterfaceFilter {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "up" | "active" => InterfaceFilter::Up,
            _ => InterfaceFilter::All,
        }
    }

    pub fn admits(self, iface: &InterfaceStats) -> bool {
        match self {
            InterfaceFilter::All => true,
            InterfaceFilter::Up => iface.is_up.unwrap_or(!iface.addresses.is_empty()),
        }
    }
}

pub struct SnapshotBuilder<P> {
    provider: P,
    interface_filter: InterfaceFilter,
}

impl<P: MetricsProvider> SnapshotBuilder<P> {
    pub fn new(provider: P, interface_filter: InterfaceFilter) -> Self {
        SnapshotBuilder {
            provider,
            interface_filter,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn capture(&mut self) -> MetricsSnapshot {
        let _capture_span = tracing::debug_span!("snapshot.capture").entered();

        self.provider.refresh();

        let cpu_percent = available(self.provider.cpu_percent());
        let memory = available(self.provider.memory());
        let uptime = available(self.provider.uptime());

        let (network, interfaces) = match available(self.provider.interfaces()) {
            Some(all) => {
                let totals = aggregate(&all);
                let shown = all
                    .into_iter()
                    .filter(|iface| self.interface_filter.admits(iface))
                    .collect();
                (totals, shown)
            }
            None => (None, Vec::new()),
        };

        let processes = available(self.provider.processes())
            .unwrap_or_default()
            .into_iter()
            .filter_map(ProcessRecord::from_sample)
            .collect();

        MetricsSnapshot {
            cpu_percent,
            memory,
            network,
            interfaces,
            uptime,
            processes,
        }
    }
}

fn available<T>(result: Result<T, MetricError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(metric = err.metric(), error = %err, "metric unavailable");
            None
        }
    }
}

/// Sum over every enumerated interface, regardless of the display filter.
fn aggregate(interfaces: &[InterfaceStats]) -> Option<NetCounters> {
    if interfaces.is_empty() {
        return None;
    }
    let mut totals = NetCounters::default();
    for iface in interfaces {
        totals.accumulate(&iface.counters);
    }
    Some(totals)
}
