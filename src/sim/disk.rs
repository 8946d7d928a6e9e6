//! Disk head scheduling over a merged track-request queue.

use crate::error::{AnalyzerError, Result};
use crate::workload::ProcessWorkload;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_INITIAL_HEAD: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiskPolicy {
    Fcfs,
    Sstf,
}

impl DiskPolicy {
    pub const ALL: [DiskPolicy; 2] = [DiskPolicy::Fcfs, DiskPolicy::Sstf];

    pub fn seek_distance(self, requests: &[u32], initial_head: u32) -> u64 {
        match self {
            DiskPolicy::Fcfs => fcfs_seek_distance(requests, initial_head),
            DiskPolicy::Sstf => sstf_seek_distance(requests, initial_head),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DiskPolicy::Fcfs => "FCFS",
            DiskPolicy::Sstf => "SSTF",
        }
    }
}

impl std::fmt::Display for DiskPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DiskPolicy {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(DiskPolicy::Fcfs),
            "sstf" => Ok(DiskPolicy::Sstf),
            _ => Err(AnalyzerError::invalid(format!(
                "unknown disk policy: {s}. Valid options: fcfs, sstf"
            ))),
        }
    }
}

/// Total head movement servicing requests in arrival order.
pub fn fcfs_seek_distance(requests: &[u32], initial_head: u32) -> u64 {
    let mut head = initial_head;
    let mut total = 0u64;
    for &track in requests {
        total += u64::from(head.abs_diff(track));
        head = track;
    }
    total
}

/// Order in which SSTF services `requests`. Equal distances go to the
/// request that arrived first.
pub fn sstf_service_order(requests: &[u32], initial_head: u32) -> Vec<u32> {
    let mut remaining = requests.to_vec();
    let mut order = Vec::with_capacity(remaining.len());
    let mut head = initial_head;

    while !remaining.is_empty() {
        let mut closest = 0;
        for (i, &track) in remaining.iter().enumerate().skip(1) {
            if track.abs_diff(head) < remaining[closest].abs_diff(head) {
                closest = i;
            }
        }
        head = remaining.remove(closest);
        order.push(head);
    }

    order
}

/// Total head movement under shortest-seek-time-first.
pub fn sstf_seek_distance(requests: &[u32], initial_head: u32) -> u64 {
    fcfs_seek_distance(&sstf_service_order(requests, initial_head), initial_head)
}

/// Seek totals for both policies over one merged request queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskStats {
    #[serde(rename = "FCFS")]
    pub fcfs: u64,
    #[serde(rename = "SSTF")]
    pub sstf: u64,
    pub request_count: usize,
    /// FCFS total over request count; 0.0 when there are none.
    pub average_seek: f64,
}

impl DiskStats {
    pub fn empty() -> Self {
        Self {
            fcfs: 0,
            sstf: 0,
            request_count: 0,
            average_seek: 0.0,
        }
    }

    pub fn seek_distance(&self, policy: DiskPolicy) -> u64 {
        match policy {
            DiskPolicy::Fcfs => self.fcfs,
            DiskPolicy::Sstf => self.sstf,
        }
    }
}

/// Concatenate disk requests in batch order.
pub fn merged_disk_requests(batch: &[ProcessWorkload]) -> Vec<u32> {
    batch
        .iter()
        .flat_map(|p| p.disk_requests.iter().copied())
        .collect()
}

pub fn simulate_disk(batch: &[ProcessWorkload], initial_head: u32) -> DiskStats {
    simulate_requests(&merged_disk_requests(batch), initial_head)
}

pub fn simulate_requests(requests: &[u32], initial_head: u32) -> DiskStats {
    if requests.is_empty() {
        return DiskStats::empty();
    }

    let fcfs = fcfs_seek_distance(requests, initial_head);
    let sstf = sstf_seek_distance(requests, initial_head);
    let request_count = requests.len();

    debug!(initial_head, request_count, fcfs, sstf, "disk simulation complete");

    DiskStats {
        fcfs,
        sstf,
        request_count,
        average_seek: fcfs as f64 / request_count as f64,
    }
}
