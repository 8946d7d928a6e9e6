//! Operating-systems bottleneck analyzer.
//!
//! Synthetic per-process workloads are replayed through FIFO, LRU and
//! Optimal page replacement and FCFS and SSTF disk scheduling. The results
//! (or live system metrics in the same shape) are classified into a
//! bottleneck category with a remediation suggestion.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod monitor;
pub mod report;
pub mod sim;
pub mod workload;

pub use analyzer::{
    analyze_performance, suggestion_for, suggestion_for_label, AnalysisResult, Bottleneck,
    BottleneckDetector, DiskMetrics, MemoryMetrics, MetricsOverride,
};
pub use config::{AnalyzerConfig, Range, SimulationParams, Thresholds, WorkloadParams};
pub use error::{AnalyzerError, Result};
pub use report::AnalysisReport;
pub use sim::{simulate_disk, simulate_memory, AlgorithmStats, DiskStats};
pub use workload::{generate_workload, ProcessWorkload};
