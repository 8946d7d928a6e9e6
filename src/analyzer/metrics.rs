//! Metric snapshots shared by the simulators and the live sampler.
//!
//! Field names serialize to the well-known key vocabulary, so a JSON file
//! written by any producer can be fed straight to the classifier. Absent
//! keys stay `None` and the classifier substitutes its defaults.

use crate::error::{AnalyzerError, Result};
use crate::sim::{AlgorithmStats, DiskStats};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_fault_rate: Option<f64>,
    #[serde(rename = "FIFO", default, skip_serializing_if = "Option::is_none")]
    pub fifo: Option<f64>,
    #[serde(rename = "LRU", default, skip_serializing_if = "Option::is_none")]
    pub lru: Option<f64>,
    #[serde(rename = "Optimal", default, skip_serializing_if = "Option::is_none")]
    pub optimal: Option<f64>,
    /// Memory usage in percent (0-100). Only real-system producers set it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_references: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskMetrics {
    #[serde(rename = "FCFS", default, skip_serializing_if = "Option::is_none")]
    pub fcfs: Option<f64>,
    #[serde(rename = "SSTF", default, skip_serializing_if = "Option::is_none")]
    pub sstf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_seek: Option<f64>,
}

impl From<&AlgorithmStats> for MemoryMetrics {
    fn from(stats: &AlgorithmStats) -> Self {
        Self {
            page_fault_rate: Some(stats.page_fault_rate),
            fifo: Some(stats.fifo as f64),
            lru: Some(stats.lru as f64),
            optimal: Some(stats.optimal as f64),
            memory_percent: None,
            total_references: Some(stats.total_references as f64),
        }
    }
}

impl From<&DiskStats> for DiskMetrics {
    fn from(stats: &DiskStats) -> Self {
        Self {
            fcfs: Some(stats.fcfs as f64),
            sstf: Some(stats.sstf as f64),
            request_count: Some(stats.request_count as f64),
            average_seek: Some(stats.average_seek),
        }
    }
}

impl MemoryMetrics {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }
}

impl DiskMetrics {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| AnalyzerError::Config(format!("malformed metrics in {}: {e}", path.display())))
}

/// User-supplied values that replace simulated pressure figures.
///
/// Applied after simulation and deliberately not checked against the
/// simulated stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsOverride {
    /// Memory usage in percent.
    pub memory_percent: Option<f64>,
    /// Disk activity, used as the FCFS seek total.
    pub disk_activity: Option<f64>,
}

impl MetricsOverride {
    pub fn is_empty(&self) -> bool {
        self.memory_percent.is_none() && self.disk_activity.is_none()
    }

    pub fn apply(&self, memory: &mut MemoryMetrics, disk: &mut DiskMetrics) {
        if let Some(percent) = self.memory_percent {
            memory.page_fault_rate = Some(percent / 100.0);
            memory.memory_percent = Some(percent);
        }
        if let Some(activity) = self.disk_activity {
            disk.fcfs = Some(activity);
            disk.sstf = Some(activity * 0.7);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_stats_convert_without_percent() {
        let stats = AlgorithmStats {
            fifo: 9,
            lru: 10,
            optimal: 7,
            total_references: 12,
            page_fault_rate: 10.0 / 12.0,
        };
        let metrics = MemoryMetrics::from(&stats);
        assert_eq!(metrics.fifo, Some(9.0));
        assert_eq!(metrics.memory_percent, None);
        assert_eq!(metrics.total_references, Some(12.0));
    }

    #[test]
    fn partial_json_uses_key_vocabulary() {
        let memory: MemoryMetrics =
            serde_json::from_str(r#"{ "memory_percent": 91.5, "LRU": 3, "used_mb": 1024 }"#).unwrap();
        assert_eq!(memory.memory_percent, Some(91.5));
        assert_eq!(memory.lru, Some(3.0));
        assert_eq!(memory.fifo, None);

        let disk: DiskMetrics = serde_json::from_str(r#"{ "FCFS": 640 }"#).unwrap();
        assert_eq!(disk.fcfs, Some(640.0));
        assert_eq!(disk.request_count, None);
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let json = serde_json::to_string(&DiskMetrics {
            fcfs: Some(1.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, r#"{"FCFS":1.0}"#);
    }

    #[test]
    fn override_replaces_pressure_figures() {
        let mut memory = MemoryMetrics {
            page_fault_rate: Some(0.2),
            lru: Some(6.0),
            ..Default::default()
        };
        let mut disk = DiskMetrics {
            fcfs: Some(100.0),
            sstf: Some(50.0),
            ..Default::default()
        };
        let overrides = MetricsOverride {
            memory_percent: Some(90.0),
            disk_activity: Some(800.0),
        };
        overrides.apply(&mut memory, &mut disk);

        assert_eq!(memory.memory_percent, Some(90.0));
        assert_eq!(memory.page_fault_rate, Some(0.9));
        assert_eq!(memory.lru, Some(6.0));
        assert_eq!(disk.fcfs, Some(800.0));
        assert!((disk.sstf.unwrap() - 560.0).abs() < 1e-9);
    }

    #[test]
    fn empty_override_is_a_no_op() {
        let overrides = MetricsOverride::default();
        assert!(overrides.is_empty());

        let mut memory = MemoryMetrics::default();
        let mut disk = DiskMetrics::default();
        overrides.apply(&mut memory, &mut disk);
        assert_eq!(memory, MemoryMetrics::default());
        assert_eq!(disk, DiskMetrics::default());
    }
}
