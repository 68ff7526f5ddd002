use std::time::Duration;

use serde::Serialize;

use crate::error::MetricError;
use crate::system::process::ProcessSample;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

impl MemoryStats {
    pub fn used_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetCounters {
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub packets_received: u64,
    pub packets_sent: u64,
}

impl NetCounters {
    pub fn accumulate(&mut self, other: &NetCounters) {
        self.bytes_received = self.bytes_received.saturating_add(other.bytes_received);
        self.bytes_sent = self.bytes_sent.saturating_add(other.bytes_sent);
        self.packets_received = self.packets_received.saturating_add(other.packets_received);
        self.packets_sent = self.packets_sent.saturating_add(other.packets_sent);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterfaceStats {
    pub name: String,
    pub counters: NetCounters,
    pub addresses: Vec<String>,
    /// Operational state when the platform reports one.
    pub is_up: Option<bool>,
}

/// Source of raw system metrics.
///
/// `refresh` is called once per tick before the individual reads. Every read
/// fails on its own; callers must not let one failure hide the others.
pub trait MetricsProvider {
    fn refresh(&mut self);
    fn cpu_percent(&self) -> Result<f32, MetricError>;
    fn memory(&self) -> Result<MemoryStats, MetricError>;
    fn interfaces(&self) -> Result<Vec<InterfaceStats>, MetricError>;
    fn processes(&self) -> Result<Vec<ProcessSample>, MetricError>;
    fn uptime(&self) -> Result<Duration, MetricError>;
}


#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// Provider returning canned values; each field may be set to fail.
    #[derive(Clone, Debug)]
    pub struct FakeProvider {
        pub cpu: Option<f32>,
        pub memory: Option<MemoryStats>,
        pub interfaces: Option<Vec<InterfaceStats>>,
        pub processes: Option<Vec<ProcessSample>>,
        pub uptime: Option<Duration>,
        pub refreshes: u32,
    }

    impl FakeProvider {
        pub fn healthy() -> Self {
            FakeProvider {
                cpu: Some(45.0),
                memory: Some(MemoryStats {
                    total: 16_000_000_000,
                    used: 8_000_000_000,
                    free: 8_000_000_000,
                }),
                interfaces: Some(vec![interface("eth0", 2_500_000, 1_250_000, &["10.0.0.2"])]),
                processes: Some(vec![
                    sample(1, "A", 10.0, 12.5, Some(2_000_000_000)),
                    sample(2, "B", 90.0, 6.25, Some(1_000_000_000)),
                ]),
                uptime: Some(Duration::from_secs(93_784)),
                refreshes: 0,
            }
        }
    }

    pub fn interface(name: &str, rx: u64, tx: u64, addrs: &[&str]) -> InterfaceStats {
        InterfaceStats {
            name: name.to_string(),
            counters: NetCounters {
                bytes_received: rx,
                bytes_sent: tx,
                packets_received: rx / 1000,
                packets_sent: tx / 1000,
            },
            addresses: addrs.iter().map(|a| a.to_string()).collect(),
            is_up: None,
        }
    }

    pub fn sample(pid: u32, name: &str, cpu: f32, ram: f32, rss: Option<u64>) -> ProcessSample {
        ProcessSample {
            pid,
            name: name.to_string(),
            cpu_percent: cpu,
            ram_percent: ram,
            rss_bytes: rss,
        }
    }

    impl MetricsProvider for FakeProvider {
        fn refresh(&mut self) {
            self.refreshes += 1;
        }

        fn cpu_percent(&self) -> Result<f32, MetricError> {
            self.cpu.ok_or(MetricError::unavailable("cpu"))
        }

        fn memory(&self) -> Result<MemoryStats, MetricError> {
            self.memory.ok_or(MetricError::unavailable("memory"))
        }

        fn interfaces(&self) -> Result<Vec<InterfaceStats>, MetricError> {
            self.interfaces.clone().ok_or(MetricError::Io {
                metric: "interfaces",
                source: std::io::Error::other("enumeration failed"),
            })
        }

        fn processes(&self) -> Result<Vec<ProcessSample>, MetricError> {
            self.processes
                .clone()
                .ok_or(MetricError::unavailable("processes"))
        }

        fn uptime(&self) -> Result<Duration, MetricError> {
            self.uptime.ok_or(MetricError::unavailable("uptime"))
        }
    }
}
