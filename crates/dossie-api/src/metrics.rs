//! Prometheus counters for dossier runs, served on `/metrics`.
use dossie_core::RunReport;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct DossieMetrics {
    registry: Registry,
    runs_total: IntCounter,
    tasks_executed_total: IntCounter,
    tasks_skipped_total: IntCounter,
    generation_failures_total: IntCounter,
}

impl DossieMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs_total = IntCounter::new("dossie_runs_total", "Completed dossier runs")?;
        let tasks_executed_total =
            IntCounter::new("dossie_tasks_executed_total", "Tasks that produced output")?;
        let tasks_skipped_total = IntCounter::new(
            "dossie_tasks_skipped_total",
            "Tasks skipped for unmet dependencies",
        )?;
        let generation_failures_total = IntCounter::new(
            "dossie_generation_failures_total",
            "Runs aborted by a generation failure",
        )?;

        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(tasks_executed_total.clone()))?;
        registry.register(Box::new(tasks_skipped_total.clone()))?;
        registry.register(Box::new(generation_failures_total.clone()))?;

        Ok(Self {
            registry,
            runs_total,
            tasks_executed_total,
            tasks_skipped_total,
            generation_failures_total,
        })
    }

    pub fn record_run(&self, report: &RunReport) {
        self.runs_total.inc();
        self.tasks_executed_total.inc_by(report.executed().count() as u64);
        self.tasks_skipped_total.inc_by(report.skipped().count() as u64);
    }

    pub fn record_generation_failure(&self) {
        self.generation_failures_total.inc();
    }

    /// Prometheus text exposition format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_exposed() {
        let metrics = DossieMetrics::new().unwrap();
        metrics.record_generation_failure();
        let text = metrics.encode().unwrap();
        assert!(text.contains("dossie_generation_failures_total 1"));
        assert!(text.contains("dossie_runs_total 0"));
    }
}
