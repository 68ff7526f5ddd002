use serde::Serialize;

/// Longest display name kept per process; longer names are cut at capture.
pub const MAX_NAME_CHARS: usize = 64;

/// Raw per-process reading as the provider reports it.
///
/// `rss_bytes` is `None` when resident memory could not be read; such
/// processes never reach a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub rss_bytes: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub rss_bytes: u64,
}

impl ProcessRecord {
    /// Builds a record from a sample, dropping samples without resident memory.
    pub fn from_sample(sample: ProcessSample) -> Option<Self> {
        let rss_bytes = sample.rss_bytes?;
        Some(ProcessRecord {
            pid: sample.pid,
            name: bounded_name(&sample.name),
            cpu_percent: sample.cpu_percent,
            ram_percent: sample.ram_percent,
            rss_bytes,
        })
    }

    /// The larger of CPU and RAM percent, used for row banding.
    pub fn peak_percent(&self) -> f32 {
        self.cpu_percent.max(self.ram_percent)
    }
}

fn bounded_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    name.chars().take(MAX_NAME_CHARS).collect()
}
