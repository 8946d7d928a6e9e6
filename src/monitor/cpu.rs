use sysinfo::System;

/// CPU monitoring
pub struct CpuMonitor {
    system: System,
}

impl CpuMonitor {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        Self { system }
    }

    /// Average utilization across cores since the previous refresh.
    pub fn collect(&mut self) -> f64 {
        self.system.refresh_cpu();
        average_utilization(self.system.cpus().iter().map(|cpu| cpu.cpu_usage()))
    }
}

fn average_utilization(per_core: impl Iterator<Item = f32>) -> f64 {
    let (sum, count) = per_core.fold((0.0f64, 0usize), |(sum, n), u| (sum + f64::from(u), n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl Default for CpuMonitor {
    fn default() -> Self {
        Self::new()
    }
}
