//! One analysis run bundled for display.

use crate::analyzer::{
    recommendations, suggestion_for, AnalysisResult, BottleneckDetector, DiskMetrics, MemoryMetrics,
    MetricsOverride,
};
use crate::config::{AnalyzerConfig, SimulationParams, Thresholds};
use crate::error::Result;
use crate::monitor::SystemSample;
use crate::sim::{simulate_disk, simulate_memory, AlgorithmStats, DiskStats};
use crate::workload::{generate_workload, ProcessWorkload};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadSummary {
    pub processes: usize,
    pub total_memory_requirement: u64,
    pub page_references: usize,
    pub disk_requests: usize,
    pub seed: Option<u64>,
    pub frame_count: usize,
    pub initial_head: u32,
}

impl WorkloadSummary {
    pub fn new(batch: &[ProcessWorkload], seed: Option<u64>, sim: SimulationParams) -> Self {
        Self {
            processes: batch.len(),
            total_memory_requirement: batch.iter().map(|p| u64::from(p.memory_requirement)).sum(),
            page_references: batch.iter().map(|p| p.page_references.len()).sum(),
            disk_requests: batch.iter().map(|p| p.disk_requests.len()).sum(),
            seed,
            frame_count: sim.frame_count,
            initial_head: sim.initial_head,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<WorkloadSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_stats: Option<AlgorithmStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_stats: Option<DiskStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<SystemSample>,
    pub memory_metrics: MemoryMetrics,
    pub disk_metrics: DiskMetrics,
    pub analysis: AnalysisResult,
    pub suggestion: String,
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// Classify already collected metrics.
    pub fn from_metrics(memory: MemoryMetrics, disk: DiskMetrics, thresholds: Thresholds) -> Self {
        let analysis = BottleneckDetector::with_thresholds(thresholds).analyze(&memory, &disk);
        Self {
            workload: None,
            memory_stats: None,
            disk_stats: None,
            live: None,
            memory_metrics: memory,
            disk_metrics: disk,
            suggestion: suggestion_for(analysis.bottleneck).to_string(),
            recommendations: recommendations(&analysis),
            analysis,
        }
    }

    /// Classify a batch that has already been generated.
    pub fn from_batch(
        batch: &[ProcessWorkload],
        config: &AnalyzerConfig,
        overrides: &MetricsOverride,
    ) -> Result<Self> {
        let sim = config.simulation;
        let memory_stats = simulate_memory(batch, sim.frame_count)?;
        let disk_stats = simulate_disk(batch, sim.initial_head);

        let mut memory = MemoryMetrics::from(&memory_stats);
        let mut disk = DiskMetrics::from(&disk_stats);
        overrides.apply(&mut memory, &mut disk);

        let mut report = Self::from_metrics(memory, disk, config.thresholds);
        report.workload = Some(WorkloadSummary::new(batch, config.workload.seed, sim));
        report.memory_stats = Some(memory_stats);
        report.disk_stats = Some(disk_stats);
        Ok(report)
    }

    /// Generate, simulate, classify and suggest in one pass.
    pub fn simulate(config: &AnalyzerConfig, overrides: &MetricsOverride) -> Result<Self> {
        let batch = generate_workload(&config.workload)?;
        Self::from_batch(&batch, config, overrides)
    }

    pub fn from_sample(sample: SystemSample, thresholds: Thresholds) -> Self {
        let (memory, disk) = sample.to_metrics();
        let mut report = Self::from_metrics(memory, disk, thresholds);
        report.live = Some(sample);
        report
    }

    /// Sentence handed to a narrator.
    pub fn narration(&self) -> String {
        format!(
            "Detected {}. Suggested action: {}",
            self.analysis.bottleneck, self.suggestion
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(w) = &self.workload {
            writeln!(f, "Workload")?;
            writeln!(f, "  Processes        {:>10}", w.processes)?;
            writeln!(f, "  Memory required  {:>10}", w.total_memory_requirement)?;
            writeln!(f, "  Page references  {:>10}", w.page_references)?;
            writeln!(f, "  Disk requests    {:>10}", w.disk_requests)?;
            writeln!(f, "  Frames           {:>10}", w.frame_count)?;
            writeln!(f, "  Initial head     {:>10}", w.initial_head)?;
            if let Some(seed) = w.seed {
                writeln!(f, "  Seed             {:>10}", seed)?;
            }
        }

        if let Some(live) = &self.live {
            writeln!(f, "Live system")?;
            writeln!(f, "  CPU              {:>9.1}%", live.cpu_percent)?;
            writeln!(f, "  Memory           {:>9.1}%", live.memory_percent)?;
            writeln!(
                f,
                "  Memory used      {:>7.0} MiB of {:.0} MiB",
                live.memory_used_mb, live.memory_total_mb
            )?;
            writeln!(
                f,
                "  Disk I/O         {:>10} reads, {} writes",
                live.disk_read_count, live.disk_write_count
            )?;
            writeln!(
                f,
                "  Disk throughput  {:>7.2} MiB/s read, {:.2} MiB/s write",
                live.disk_read_mb_s, live.disk_write_mb_s
            )?;
            writeln!(f, "  Root filesystem  {:>9.1}%", live.disk_percent)?;
        }

        let ctx = &self.analysis.context;
        writeln!(f, "Metrics")?;
        writeln!(f, "  Page fault rate  {:>10.3}", self.analysis.page_fault_rate)?;
        writeln!(f, "  Memory usage     {:>9.1}%", ctx.memory_percent)?;
        writeln!(f, "  FIFO faults      {:>10.0}", ctx.fifo_faults)?;
        writeln!(f, "  LRU faults       {:>10.0}", ctx.lru_faults)?;
        writeln!(f, "  Optimal faults   {:>10.0}", ctx.optimal_faults)?;
        writeln!(f, "  Seek (FCFS)      {:>10.0}", self.analysis.disk_seek_time)?;
        writeln!(f, "  Seek (SSTF)      {:>10.0}", ctx.disk_sstf)?;
        writeln!(f, "  Disk requests    {:>10.0}", ctx.request_count)?;

        writeln!(f, "Result: {}", self.analysis.bottleneck)?;
        for line in &self.recommendations {
            writeln!(f, "  - {line}")?;
        }
        Ok(())
    }
}
