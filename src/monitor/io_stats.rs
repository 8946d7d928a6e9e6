use procfs::ProcResult;
use sysinfo::Disks;

const SECTOR_BYTES: u64 = 512;

/// Block-device counters from /proc/diskstats.
pub struct IoStatsMonitor {
    device: Option<String>,
}

/// Cumulative counters, summed over the selected devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoCounters {
    pub reads: u64,
    pub writes: u64,
    pub sectors_read: u64,
    pub sectors_written: u64,
    pub in_flight: u64,
}

impl IoCounters {
    /// Counter growth since `earlier`. Counters that went backwards
    /// (device reset, hotplug) count as zero.
    pub fn since(&self, earlier: &IoCounters) -> IoCounters {
        IoCounters {
            reads: self.reads.saturating_sub(earlier.reads),
            writes: self.writes.saturating_sub(earlier.writes),
            sectors_read: self.sectors_read.saturating_sub(earlier.sectors_read),
            sectors_written: self.sectors_written.saturating_sub(earlier.sectors_written),
            in_flight: self.in_flight,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.sectors_read * SECTOR_BYTES
    }

    pub fn bytes_written(&self) -> u64 {
        self.sectors_written * SECTOR_BYTES
    }
}

impl IoStatsMonitor {
    /// `device` is a kernel name such as `nvme0n1`; `None` sums all
    /// physical devices.
    pub fn new(device: Option<String>) -> Self {
        Self { device }
    }

    fn selected(&self, name: &str) -> bool {
        match &self.device {
            Some(device) => name == device,
            None => !(name.starts_with("loop") || name.starts_with("ram")),
        }
    }

    pub fn collect(&self) -> ProcResult<IoCounters> {
        let diskstats = procfs::diskstats()?;

        let mut found = false;
        let mut counters = IoCounters::default();
        for entry in diskstats.iter().filter(|e| self.selected(&e.name)) {
            found = true;
            counters.reads += entry.reads;
            counters.writes += entry.writes;
            counters.sectors_read += entry.sectors_read;
            counters.sectors_written += entry.sectors_written;
            counters.in_flight += entry.in_progress;
        }

        if self.device.is_some() && !found {
            return Err(procfs::ProcError::NotFound(None));
        }
        Ok(counters)
    }
}

/// Used-space percentage of the filesystem mounted at `/`.
pub fn root_disk_percent() -> Option<f64> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .find(|d| d.mount_point() == std::path::Path::new("/"))
        .filter(|d| d.total_space() > 0)
        .map(|d| {
            let used = d.total_space().saturating_sub(d.available_space());
            used as f64 / d.total_space() as f64 * 100.0
        })
}
