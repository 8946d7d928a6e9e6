use sysinfo::System;

const MIB: f64 = 1024.0 * 1024.0;

/// Memory monitoring
pub struct MemoryMonitor {
    system: System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub utilization_percent: f64,
}

impl MemoryUsage {
    pub fn from_bytes(total_bytes: u64, used_bytes: u64, available_bytes: u64) -> Self {
        let utilization_percent = if total_bytes > 0 {
            used_bytes as f64 / total_bytes as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total_bytes,
            used_bytes,
            available_bytes,
            utilization_percent,
        }
    }

    pub fn total_mb(&self) -> f64 {
        self.total_bytes as f64 / MIB
    }

    pub fn used_mb(&self) -> f64 {
        self.used_bytes as f64 / MIB
    }

    pub fn available_mb(&self) -> f64 {
        self.available_bytes as f64 / MIB
    }
}

impl MemoryMonitor {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_memory();
        Self { system }
    }

    pub fn collect(&mut self) -> MemoryUsage {
        self.system.refresh_memory();

        // sysinfo reports bytes.
        MemoryUsage::from_bytes(
            self.system.total_memory(),
            self.system.used_memory(),
            self.system.available_memory(),
        )
    }
}

impl Default for MemoryMonitor {
    fn default() -> Self {
        Self::new()
    }
}
