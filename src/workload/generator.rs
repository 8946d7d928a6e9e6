use crate::config::WorkloadParams;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Simplified resource needs of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessWorkload {
    pub pid: u32,
    /// Informational only; the simulators never read it.
    pub memory_requirement: u32,
    pub page_references: Vec<u32>,
    pub disk_requests: Vec<u32>,
}

/// Synthetic workload generator.
///
/// Owns its random source, so every generator is confined to one call
/// and a fixed seed always reproduces the same batch.
pub struct WorkloadGenerator {
    params: WorkloadParams,
    rng: StdRng,
}

impl WorkloadGenerator {
    pub fn new(params: WorkloadParams) -> Result<Self> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { params, rng })
    }

    /// Draw the next process. Pids start at 1.
    fn next_process(&mut self, pid: u32) -> ProcessWorkload {
        let p = &self.params;
        let rng = &mut self.rng;

        let memory_requirement = rng.gen_range(p.memory_range.low..=p.memory_range.high);
        let page_references = (0..p.reference_length)
            .map(|_| rng.gen_range(0..p.num_pages))
            .collect();
        let disk_requests = (0..p.disk_request_count)
            .map(|_| rng.gen_range(p.disk_track_range.low..=p.disk_track_range.high))
            .collect();

        ProcessWorkload {
            pid,
            memory_requirement,
            page_references,
            disk_requests,
        }
    }

    /// Produce exactly `num_processes` workloads.
    pub fn generate(mut self) -> Vec<ProcessWorkload> {
        let count = self.params.num_processes as u32;
        let batch: Vec<ProcessWorkload> = (1..=count).map(|pid| self.next_process(pid)).collect();
        tracing::debug!(
            processes = batch.len(),
            seed = ?self.params.seed,
            "generated workload"
        );
        batch
    }
}

/// Validate `params` and generate a batch in one step.
pub fn generate_workload(params: &WorkloadParams) -> Result<Vec<ProcessWorkload>> {
    Ok(WorkloadGenerator::new(params.clone())?.generate())
}
