pub mod generator;

pub use generator::{generate_workload, ProcessWorkload, WorkloadGenerator};
