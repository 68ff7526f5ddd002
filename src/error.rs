use thiserror::Error;

/// A single metric source could not be read this tick.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("{metric} is not reported on this system")]
    Unavailable { metric: &'static str },

    #[error("failed to read {metric}: {source}")]
    Io {
        metric: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl MetricError {
    pub fn unavailable(metric: &'static str) -> Self {
        MetricError::Unavailable { metric }
    }

    pub fn metric(&self) -> &'static str {
        match self {
            MetricError::Unavailable { metric } | MetricError::Io { metric, .. } => metric,
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("terminal could not be initialized: {0}")]
    TerminalInit(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_name_survives_both_variants() {
        let unavailable = MetricError::unavailable("uptime");
        assert_eq!(unavailable.metric(), "uptime");
        assert_eq!(unavailable.to_string(), "uptime is not reported on this system");

        let io = MetricError::Io {
            metric: "interfaces",
            source: std::io::Error::other("boom"),
        };
        assert_eq!(io.metric(), "interfaces");
        assert!(io.to_string().contains("boom"));
    }
}
