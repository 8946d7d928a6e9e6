pub mod disk;
pub mod memory;

pub use disk::{simulate_disk, DiskPolicy, DiskStats, DEFAULT_INITIAL_HEAD};
pub use memory::{simulate_memory, AlgorithmStats, ReplacementPolicy};
