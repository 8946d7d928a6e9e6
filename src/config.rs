use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Inclusive integer range, written `low-high` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Range {
    pub low: u32,
    pub high: u32,
}

impl Range {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if self.low > self.high {
            return Err(AnalyzerError::invalid(format!(
                "{name} low bound {} exceeds high bound {}",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

impl From<(u32, u32)> for Range {
    fn from((low, high): (u32, u32)) -> Self {
        Self { low, high }
    }
}

impl From<Range> for (u32, u32) {
    fn from(range: Range) -> Self {
        (range.low, range.high)
    }
}

/// Parse a range such as "128-512", "128..512" or "128,512"
pub fn parse_range(s: &str) -> Result<Range> {
    let s = s.trim();
    let (low, high) = s
        .split_once("..")
        .or_else(|| s.split_once('-'))
        .or_else(|| s.split_once(','))
        .ok_or_else(|| AnalyzerError::invalid(format!("invalid range: {s} (expected LOW-HIGH)")))?;

    let low: u32 = low
        .trim()
        .parse()
        .map_err(|_| AnalyzerError::invalid(format!("invalid low bound in range: {s}")))?;
    let high: u32 = high
        .trim()
        .parse()
        .map_err(|_| AnalyzerError::invalid(format!("invalid high bound in range: {s}")))?;

    let range = Range::new(low, high);
    range.validate("range")?;
    Ok(range)
}

impl std::str::FromStr for Range {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        parse_range(s)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Parameters for the workload generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadParams {
    pub num_processes: usize,
    pub memory_range: Range,
    pub reference_length: usize,
    /// Exclusive upper bound for page ids.
    pub num_pages: u32,
    pub disk_request_count: usize,
    pub disk_track_range: Range,
    /// `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            num_processes: 5,
            memory_range: Range::new(128, 512),
            reference_length: 30,
            num_pages: 32,
            disk_request_count: 15,
            disk_track_range: Range::new(0, 499),
            seed: None,
        }
    }
}

impl WorkloadParams {
    pub fn validate(&self) -> Result<()> {
        if self.num_processes == 0 {
            return Err(AnalyzerError::invalid("num_processes must be a positive integer"));
        }
        if self.reference_length == 0 || self.num_pages == 0 || self.disk_request_count == 0 {
            return Err(AnalyzerError::invalid(
                "reference_length, num_pages, and disk_request_count must be positive",
            ));
        }
        if self.memory_range.low == 0 {
            return Err(AnalyzerError::invalid("memory_range bounds must be positive"));
        }
        self.memory_range.validate("memory_range")?;
        self.disk_track_range.validate("disk_track_range")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub frame_count: usize,
    pub initial_head: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            frame_count: 12,
            initial_head: 100,
        }
    }
}

/// Classifier thresholds. `memory` is a fraction: 0.85 means 85%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub disk: f64,
    pub memory: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            disk: 500.0,
            memory: 0.85,
        }
    }
}

/// Top-level configuration, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub workload: WorkloadParams,
    pub simulation: SimulationParams,
    pub thresholds: Thresholds,
    pub log_level: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            workload: WorkloadParams::default(),
            simulation: SimulationParams::default(),
            thresholds: Thresholds::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| AnalyzerError::Config(format!("malformed config: {e}")))
    }

    /// Map `log_level` onto a tracing level, defaulting to INFO.
    pub fn log_level(&self) -> Level {
        parse_log_level(&self.log_level)
    }
}

pub fn parse_log_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_range_separators() {
        assert_eq!(parse_range("128-512").unwrap(), Range::new(128, 512));
        assert_eq!(parse_range(" 0..499 ").unwrap(), Range::new(0, 499));
        assert_eq!(parse_range("7,7").unwrap(), Range::new(7, 7));
    }

    #[test]
    fn rejects_inverted_and_malformed_ranges() {
        assert!(matches!(
            parse_range("512-128"),
            Err(AnalyzerError::InvalidParameter(_))
        ));
        assert!(parse_range("abc").is_err());
        assert!(parse_range("1-x").is_err());
    }

    #[test]
    fn workload_defaults_are_valid() {
        WorkloadParams::default().validate().unwrap();
    }

    #[test]
    fn zero_counts_are_rejected() {
        let params = WorkloadParams {
            num_processes: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = WorkloadParams {
            num_pages: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = WorkloadParams {
            disk_track_range: Range::new(10, 5),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let config = AnalyzerConfig::from_json(
            r#"{ "simulation": { "frame_count": 4 }, "workload": { "seed": 9, "memory_range": [64, 96] } }"#,
        )
        .unwrap();
        assert_eq!(config.simulation.frame_count, 4);
        assert_eq!(config.simulation.initial_head, 100);
        assert_eq!(config.workload.seed, Some(9));
        assert_eq!(config.workload.memory_range, Range::new(64, 96));
        assert_eq!(config.workload.num_processes, 5);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            AnalyzerConfig::from_json("{ not json"),
            Err(AnalyzerError::Config(_))
        ));
    }

    #[test]
    fn log_level_falls_back_to_info() {
        assert_eq!(parse_log_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_log_level("loud"), Level::INFO);
    }
}
