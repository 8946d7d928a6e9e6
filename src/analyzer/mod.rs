pub mod detector;
pub mod metrics;
pub mod suggestion;

pub use detector::{analyze_performance, AnalysisContext, AnalysisResult, Bottleneck, BottleneckDetector};
pub use metrics::{DiskMetrics, MemoryMetrics, MetricsOverride};
pub use suggestion::{recommendations, suggestion_for, suggestion_for_label};
