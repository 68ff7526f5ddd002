use std::time::Duration;

use sysinfo::{Networks, ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform;
use super::process::ProcessSample;
use super::provider::{InterfaceStats, MemoryStats, MetricsProvider, NetCounters};
use crate::error::MetricError;

/// `MetricsProvider` backed by `sysinfo`.
pub struct Collector {
    sys: System,
    networks: Networks,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        Collector {
            sys,
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl MetricsProvider for Collector {
    fn refresh(&mut self) {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        self.networks.refresh(true);
    }

    fn cpu_percent(&self) -> Result<f32, MetricError> {
        if self.sys.cpus().is_empty() {
            return Err(MetricError::unavailable("cpu"));
        }
        Ok(self.sys.global_cpu_usage())
    }

    fn memory(&self) -> Result<MemoryStats, MetricError> {
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(MetricError::unavailable("memory"));
        }
        Ok(MemoryStats {
            total,
            used: self.sys.used_memory(),
            free: self.sys.free_memory(),
        })
    }

    fn interfaces(&self) -> Result<Vec<InterfaceStats>, MetricError> {
        let mut interfaces: Vec<InterfaceStats> = self
            .networks
            .iter()
            .map(|(name, data)| InterfaceStats {
                name: name.clone(),
                counters: NetCounters {
                    bytes_received: data.total_received(),
                    bytes_sent: data.total_transmitted(),
                    packets_received: data.total_packets_received(),
                    packets_sent: data.total_packets_transmitted(),
                },
                addresses: data
                    .ip_networks()
                    .iter()
                    .map(|net| net.addr.to_string())
                    .collect(),
                is_up: platform::interface_is_up(name),
            })
            .collect();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }

    fn processes(&self) -> Result<Vec<ProcessSample>, MetricError> {
        let total_memory = self.sys.total_memory();
        let mut samples: Vec<ProcessSample> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| {
                let memory = process.memory();
                let ram_percent = if total_memory > 0 {
                    (memory as f64 / total_memory as f64 * 100.0) as f32
                } else {
                    0.0
                };
                ProcessSample {
                    pid: pid.as_u32(),
                    name: process.name().to_string_lossy().to_string(),
                    cpu_percent: process.cpu_usage(),
                    ram_percent,
                    // Kernel threads report no resident set.
                    rss_bytes: (memory > 0).then_some(memory),
                }
            })
            .collect();

        if samples.is_empty() {
            return Err(MetricError::unavailable("processes"));
        }
        // HashMap order is random; PID order keeps rankings reproducible.
        samples.sort_by_key(|s| s.pid);
        Ok(samples)
    }

    fn uptime(&self) -> Result<Duration, MetricError> {
        match System::uptime() {
            0 => Err(MetricError::unavailable("uptime")),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}
