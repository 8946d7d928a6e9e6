//! Page-replacement policies replayed over a merged reference string.
//!
//! Resident pages live in a `Vec` so eviction ties always resolve to the
//! first candidate in frame order.

use crate::error::{AnalyzerError, Result};
use crate::workload::ProcessWorkload;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Page-replacement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementPolicy {
    Fifo,
    Lru,
    Optimal,
}

impl ReplacementPolicy {
    pub const ALL: [ReplacementPolicy; 3] = [
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Lru,
        ReplacementPolicy::Optimal,
    ];

    pub fn page_faults(self, references: &[u32], frame_count: usize) -> Result<usize> {
        match self {
            ReplacementPolicy::Fifo => fifo_page_faults(references, frame_count),
            ReplacementPolicy::Lru => lru_page_faults(references, frame_count),
            ReplacementPolicy::Optimal => optimal_page_faults(references, frame_count),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReplacementPolicy::Fifo => "FIFO",
            ReplacementPolicy::Lru => "LRU",
            ReplacementPolicy::Optimal => "Optimal",
        }
    }
}

impl std::fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ReplacementPolicy {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fifo" => Ok(ReplacementPolicy::Fifo),
            "lru" => Ok(ReplacementPolicy::Lru),
            "optimal" | "opt" => Ok(ReplacementPolicy::Optimal),
            _ => Err(AnalyzerError::invalid(format!(
                "unknown replacement policy: {s}. Valid options: fifo, lru, optimal"
            ))),
        }
    }
}

fn check_frames(frame_count: usize) -> Result<()> {
    if frame_count == 0 {
        return Err(AnalyzerError::invalid("frame_count must be positive"));
    }
    Ok(())
}

/// FIFO: evict in insertion order through a rotating pointer.
pub fn fifo_page_faults(references: &[u32], frame_count: usize) -> Result<usize> {
    check_frames(frame_count)?;

    let mut frames: Vec<u32> = Vec::with_capacity(frame_count);
    let mut pointer = 0;
    let mut faults = 0;

    for &page in references {
        if frames.contains(&page) {
            continue;
        }
        faults += 1;
        if frames.len() < frame_count {
            frames.push(page);
        } else {
            frames[pointer] = page;
            pointer = (pointer + 1) % frame_count;
        }
    }

    Ok(faults)
}

/// LRU: evict the resident page whose last reference is oldest.
pub fn lru_page_faults(references: &[u32], frame_count: usize) -> Result<usize> {
    check_frames(frame_count)?;

    let mut frames: Vec<u32> = Vec::with_capacity(frame_count);
    let mut last_used: HashMap<u32, usize> = HashMap::new();
    let mut faults = 0;

    for (idx, &page) in references.iter().enumerate() {
        if !frames.contains(&page) {
            faults += 1;
            if frames.len() < frame_count {
                frames.push(page);
            } else {
                // min_by_key keeps the first of equal minima.
                let victim = frames
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &p)| last_used.get(&p).map_or(-1, |&i| i as i64))
                    .map(|(slot, _)| slot)
                    .unwrap_or(0);
                frames[victim] = page;
            }
        }
        last_used.insert(page, idx);
    }

    Ok(faults)
}

/// Optimal (Belady): evict the resident page used furthest in the future,
/// or never again. Next use is rescanned from the live suffix on every
/// eviction.
pub fn optimal_page_faults(references: &[u32], frame_count: usize) -> Result<usize> {
    check_frames(frame_count)?;

    let mut frames: Vec<u32> = Vec::with_capacity(frame_count);
    let mut faults = 0;

    for (idx, &page) in references.iter().enumerate() {
        if frames.contains(&page) {
            continue;
        }
        faults += 1;
        if frames.len() < frame_count {
            frames.push(page);
            continue;
        }

        let future = &references[idx + 1..];
        let mut victim = 0;
        let mut furthest = 0;
        for (slot, resident) in frames.iter().enumerate() {
            let next_use = future
                .iter()
                .position(|p| p == resident)
                .unwrap_or(usize::MAX);
            if slot == 0 || next_use > furthest {
                victim = slot;
                furthest = next_use;
            }
        }
        frames[victim] = page;
    }

    Ok(faults)
}

/// Fault counts for all three policies over one merged reference string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmStats {
    #[serde(rename = "FIFO")]
    pub fifo: usize,
    #[serde(rename = "LRU")]
    pub lru: usize,
    #[serde(rename = "Optimal")]
    pub optimal: usize,
    pub total_references: usize,
    /// LRU faults over total references; 0.0 when there are none.
    pub page_fault_rate: f64,
}

impl AlgorithmStats {
    pub fn empty() -> Self {
        Self {
            fifo: 0,
            lru: 0,
            optimal: 0,
            total_references: 0,
            page_fault_rate: 0.0,
        }
    }

    pub fn faults(&self, policy: ReplacementPolicy) -> usize {
        match policy {
            ReplacementPolicy::Fifo => self.fifo,
            ReplacementPolicy::Lru => self.lru,
            ReplacementPolicy::Optimal => self.optimal,
        }
    }
}

/// Concatenate page references in batch order.
pub fn merged_page_references(batch: &[ProcessWorkload]) -> Vec<u32> {
    batch
        .iter()
        .flat_map(|p| p.page_references.iter().copied())
        .collect()
}

/// Replay the whole batch as one reference string through every policy.
pub fn simulate_memory(batch: &[ProcessWorkload], frame_count: usize) -> Result<AlgorithmStats> {
    check_frames(frame_count)?;

    let references = merged_page_references(batch);
    simulate_references(&references, frame_count)
}

/// Same as [`simulate_memory`] over an already merged reference string.
pub fn simulate_references(references: &[u32], frame_count: usize) -> Result<AlgorithmStats> {
    check_frames(frame_count)?;

    let total_references = references.len();
    if total_references == 0 {
        return Ok(AlgorithmStats::empty());
    }

    let fifo = fifo_page_faults(references, frame_count)?;
    let lru = lru_page_faults(references, frame_count)?;
    let optimal = optimal_page_faults(references, frame_count)?;

    debug!(
        frame_count,
        total_references, fifo, lru, optimal, "memory simulation complete"
    );

    Ok(AlgorithmStats {
        fifo,
        lru,
        optimal,
        total_references,
        page_fault_rate: lru as f64 / total_references as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BELADY: [u32; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

    #[test]
    fn reference_string_with_three_frames() {
        assert_eq!(fifo_page_faults(&BELADY, 3).unwrap(), 9);
        assert_eq!(lru_page_faults(&BELADY, 3).unwrap(), 10);
        assert_eq!(optimal_page_faults(&BELADY, 3).unwrap(), 7);
    }

    #[test]
    fn fifo_shows_beladys_anomaly() {
        // More frames, more faults.
        assert_eq!(fifo_page_faults(&BELADY, 4).unwrap(), 10);
        assert_eq!(lru_page_faults(&BELADY, 4).unwrap(), 8);
        assert_eq!(optimal_page_faults(&BELADY, 4).unwrap(), 6);
    }

    #[test]
    fn fifo_ignores_recency() {
        // 1 is re-used before 3 arrives but is still the oldest insertion.
        let refs = [1, 2, 1, 3, 1];
        assert_eq!(fifo_page_faults(&refs, 2).unwrap(), 4);
        assert_eq!(lru_page_faults(&refs, 2).unwrap(), 3);
    }

    #[test]
    fn optimal_evicts_first_never_used_page() {
        // At 4, pages 1 and 2 are never used again; 1 sits in slot 0.
        // Then 2 must still be resident for the final reference.
        let refs = [1, 2, 3, 4, 3, 2];
        assert_eq!(optimal_page_faults(&refs, 3).unwrap(), 4);
    }

    #[test]
    fn single_frame_faults_on_every_change() {
        let refs = [1, 1, 2, 2, 1];
        for policy in ReplacementPolicy::ALL {
            assert_eq!(policy.page_faults(&refs, 1).unwrap(), 3, "{policy}");
        }
    }

    #[test]
    fn zero_frames_is_invalid() {
        for policy in ReplacementPolicy::ALL {
            assert!(matches!(
                policy.page_faults(&BELADY, 0),
                Err(AnalyzerError::InvalidParameter(_))
            ));
        }
        assert!(simulate_memory(&[], 0).is_err());
    }

    #[test]
    fn empty_batch_yields_zero_stats() {
        assert_eq!(simulate_memory(&[], 3).unwrap(), AlgorithmStats::empty());

        let idle = ProcessWorkload {
            pid: 1,
            memory_requirement: 128,
            page_references: vec![],
            disk_requests: vec![5],
        };
        assert_eq!(simulate_memory(&[idle], 3).unwrap(), AlgorithmStats::empty());
    }

    #[test]
    fn batch_is_flattened_in_order() {
        let batch = vec![
            ProcessWorkload {
                pid: 1,
                memory_requirement: 128,
                page_references: BELADY[..6].to_vec(),
                disk_requests: vec![],
            },
            ProcessWorkload {
                pid: 2,
                memory_requirement: 256,
                page_references: BELADY[6..].to_vec(),
                disk_requests: vec![],
            },
        ];
        assert_eq!(merged_page_references(&batch), BELADY.to_vec());

        let stats = simulate_memory(&batch, 3).unwrap();
        assert_eq!(stats.fifo, 9);
        assert_eq!(stats.lru, 10);
        assert_eq!(stats.optimal, 7);
        assert_eq!(stats.total_references, 12);
        assert!((stats.page_fault_rate - 10.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn stats_serialize_with_policy_keys() {
        let stats = simulate_references(&BELADY, 3).unwrap();
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["FIFO"], 9);
        assert_eq!(json["LRU"], 10);
        assert_eq!(json["Optimal"], 7);
        assert_eq!(json["total_references"], 12);
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!("LRU".parse::<ReplacementPolicy>().unwrap(), ReplacementPolicy::Lru);
        assert_eq!("opt".parse::<ReplacementPolicy>().unwrap(), ReplacementPolicy::Optimal);
        assert!("clock".parse::<ReplacementPolicy>().is_err());
    }
}
