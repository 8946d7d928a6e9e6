use crate::analyzer::metrics::{DiskMetrics, MemoryMetrics};
use crate::config::Thresholds;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request count above which the disk is considered saturated regardless
/// of seek distance.
pub const REQUEST_COUNT_LIMIT: f64 = 100.0;

/// FIFO must exceed LRU faults by this factor to be flagged.
pub const FIFO_LRU_RATIO: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bottleneck {
    #[serde(rename = "RAM Bottleneck")]
    Ram,
    #[serde(rename = "Disk I/O Bottleneck")]
    DiskIo,
    #[serde(rename = "Inefficient Page Replacement")]
    InefficientPageReplacement,
    #[serde(rename = "Balanced System")]
    Balanced,
}

impl Bottleneck {
    pub const ALL: [Bottleneck; 4] = [
        Bottleneck::Ram,
        Bottleneck::DiskIo,
        Bottleneck::InefficientPageReplacement,
        Bottleneck::Balanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bottleneck::Ram => "RAM Bottleneck",
            Bottleneck::DiskIo => "Disk I/O Bottleneck",
            Bottleneck::InefficientPageReplacement => "Inefficient Page Replacement",
            Bottleneck::Balanced => "Balanced System",
        }
    }

    /// Exact-match lookup of a category label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

impl std::fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Auxiliary values for display. Every field is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub fifo_faults: f64,
    pub lru_faults: f64,
    pub optimal_faults: f64,
    pub disk_sstf: f64,
    pub request_count: f64,
    /// The percentage the memory rule compared against.
    pub memory_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub bottleneck: Bottleneck,
    pub page_fault_rate: f64,
    /// FCFS seek total.
    pub disk_seek_time: f64,
    pub context: AnalysisContext,
}

/// Bottleneck classifier.
///
/// Rules are checked in order and the first match wins: RAM, disk I/O,
/// inefficient page replacement, balanced.
pub struct BottleneckDetector {
    thresholds: Thresholds,
}

impl BottleneckDetector {
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn analyze(&self, memory: &MemoryMetrics, disk: &DiskMetrics) -> AnalysisResult {
        let page_fault_rate = memory.page_fault_rate.unwrap_or(0.0);
        let fifo_faults = memory.fifo.unwrap_or(0.0);
        let lru_faults = memory.lru.unwrap_or(0.0);
        let disk_seek_time = disk.fcfs.unwrap_or(0.0);
        let request_count = disk.request_count.unwrap_or(0.0);

        // Real-system producers supply a percentage; simulated ones only a
        // rate. Both are checked.
        let memory_percent = memory.memory_percent.unwrap_or(page_fault_rate * 100.0);

        let bottleneck = if memory_percent > self.thresholds.memory * 100.0
            || page_fault_rate > self.thresholds.memory
        {
            Bottleneck::Ram
        } else if disk_seek_time > self.thresholds.disk || request_count > REQUEST_COUNT_LIMIT {
            Bottleneck::DiskIo
        } else if lru_faults != 0.0 && fifo_faults > lru_faults * FIFO_LRU_RATIO {
            Bottleneck::InefficientPageReplacement
        } else {
            Bottleneck::Balanced
        };

        info!(
            bottleneck = bottleneck.label(),
            page_fault_rate, memory_percent, disk_seek_time, request_count, "classified workload"
        );

        AnalysisResult {
            bottleneck,
            page_fault_rate,
            disk_seek_time,
            context: AnalysisContext {
                fifo_faults,
                lru_faults,
                optimal_faults: memory.optimal.unwrap_or(0.0),
                disk_sstf: disk.sstf.unwrap_or(0.0),
                request_count,
                memory_percent,
            },
        }
    }
}

impl Default for BottleneckDetector {
    fn default() -> Self {
        Self::new()
    }
}

pub fn analyze_performance(
    memory: &MemoryMetrics,
    disk: &DiskMetrics,
    thresholds: Thresholds,
) -> AnalysisResult {
    BottleneckDetector::with_thresholds(thresholds).analyze(memory, disk)
}
