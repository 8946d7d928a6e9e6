pub mod collector;
pub mod cpu;
pub mod io_stats;
pub mod memory;

pub use collector::{MonitorCollector, SystemSample};
pub use cpu::CpuMonitor;
pub use io_stats::IoStatsMonitor;
pub use memory::MemoryMonitor;
