use crate::analyzer::{DiskMetrics, MemoryMetrics};
use crate::monitor::io_stats::{root_disk_percent, IoCounters};
use crate::monitor::{CpuMonitor, IoStatsMonitor, MemoryMonitor};
use serde::Serialize;
use std::time::Instant;
use tracing::warn;

/// Weight turning a raw I/O count into a seek-time proxy.
const SEEK_PER_IO: f64 = 10.0;

/// One reading of the live system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SystemSample {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_total_mb: f64,
    pub memory_used_mb: f64,
    pub memory_available_mb: f64,
    /// Reads completed since the previous sample.
    pub disk_read_count: u64,
    /// Writes completed since the previous sample.
    pub disk_write_count: u64,
    pub disk_read_mb_s: f64,
    pub disk_write_mb_s: f64,
    pub disk_in_flight: u64,
    pub disk_percent: f64,
}

impl SystemSample {
    /// Express the sample in the classifier's key vocabulary.
    pub fn to_metrics(&self) -> (MemoryMetrics, DiskMetrics) {
        let used = self.memory_used_mb;
        let memory = MemoryMetrics {
            page_fault_rate: Some(self.memory_percent / 100.0),
            fifo: Some(used),
            lru: Some(used * 0.95),
            optimal: Some(used * 0.90),
            memory_percent: Some(self.memory_percent),
            total_references: None,
        };

        let io_count = (self.disk_read_count + self.disk_write_count) as f64;
        let activity = io_count * SEEK_PER_IO;
        let disk = DiskMetrics {
            fcfs: Some(activity),
            sstf: Some(activity * 0.7),
            request_count: Some(io_count),
            average_seek: None,
        };

        (memory, disk)
    }
}

/// Unified live-metrics collector.
///
/// Sources that cannot be read are reported as zero with a warning; a
/// sample is always produced.
pub struct MonitorCollector {
    cpu_monitor: CpuMonitor,
    memory_monitor: MemoryMonitor,
    io_monitor: IoStatsMonitor,
    last_io: Option<(IoCounters, Instant)>,
}

impl MonitorCollector {
    pub fn new(device: Option<String>) -> Self {
        Self {
            cpu_monitor: CpuMonitor::new(),
            memory_monitor: MemoryMonitor::new(),
            io_monitor: IoStatsMonitor::new(device),
            last_io: None,
        }
    }

    pub fn collect(&mut self) -> SystemSample {
        let cpu_percent = self.cpu_monitor.collect();
        let memory = self.memory_monitor.collect();

        let now = Instant::now();
        let counters = match self.io_monitor.collect() {
            Ok(counters) => Some(counters),
            Err(e) => {
                warn!("disk statistics unavailable: {e}");
                None
            }
        };

        // The first sample has no baseline and reports no activity.
        let (delta, elapsed) = match (counters, self.last_io) {
            (Some(current), Some((previous, at))) => {
                (current.since(&previous), now.duration_since(at).as_secs_f64())
            }
            (Some(current), None) => (
                IoCounters {
                    in_flight: current.in_flight,
                    ..Default::default()
                },
                0.0,
            ),
            (None, _) => (IoCounters::default(), 0.0),
        };
        if let Some(current) = counters {
            self.last_io = Some((current, now));
        }

        let rate = |bytes: u64| {
            if elapsed > 0.0 {
                bytes as f64 / (1024.0 * 1024.0) / elapsed
            } else {
                0.0
            }
        };

        let disk_percent = root_disk_percent().unwrap_or_else(|| {
            warn!("root filesystem usage unavailable");
            0.0
        });

        SystemSample {
            cpu_percent,
            memory_percent: memory.utilization_percent,
            memory_total_mb: memory.total_mb(),
            memory_used_mb: memory.used_mb(),
            memory_available_mb: memory.available_mb(),
            disk_read_count: delta.reads,
            disk_write_count: delta.writes,
            disk_read_mb_s: rate(delta.bytes_read()),
            disk_write_mb_s: rate(delta.bytes_written()),
            disk_in_flight: delta.in_flight,
            disk_percent,
        }
    }
}
