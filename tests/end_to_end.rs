use bottleneck_analyzer::analyzer::suggestion_for_label;
use bottleneck_analyzer::config::{AnalyzerConfig, Thresholds};
use bottleneck_analyzer::{
    analyze_performance, simulate_disk, simulate_memory, AnalysisReport, Bottleneck, DiskMetrics,
    MemoryMetrics, MetricsOverride, ProcessWorkload,
};

fn reference_process() -> ProcessWorkload {
    ProcessWorkload {
        pid: 1,
        memory_requirement: 256,
        page_references: vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5],
        disk_requests: vec![98, 183, 37, 122, 14, 124, 65, 67],
    }
}

#[test]
fn reference_scenario() {
    let batch = vec![reference_process()];

    let memory = simulate_memory(&batch, 3).unwrap();
    assert_eq!(memory.fifo, 9);
    assert_eq!(memory.lru, 10);
    assert_eq!(memory.optimal, 7);
    assert_eq!(memory.total_references, 12);

    let disk = simulate_disk(&batch, 53);
    assert_eq!(disk.fcfs, 640);
    assert_eq!(disk.sstf, 236);
    assert_eq!(disk.request_count, 8);

    // Rate 10/12 stays under 0.85, FCFS 640 exceeds 500.
    let result = analyze_performance(
        &MemoryMetrics::from(&memory),
        &DiskMetrics::from(&disk),
        Thresholds::default(),
    );
    assert_eq!(result.bottleneck, Bottleneck::DiskIo);
    assert_eq!(result.disk_seek_time, 640.0);
    assert_eq!(result.context.fifo_faults, 9.0);
    assert_eq!(result.context.lru_faults, 10.0);
    assert_eq!(result.context.optimal_faults, 7.0);
    assert_eq!(result.context.disk_sstf, 236.0);
    assert_eq!(result.context.request_count, 8.0);

    // FIFO 9 is not worse than 1.25 x LRU 10.
    let relaxed = Thresholds {
        disk: 1000.0,
        ..Default::default()
    };
    let result = analyze_performance(
        &MemoryMetrics::from(&memory),
        &DiskMetrics::from(&disk),
        relaxed,
    );
    assert_eq!(result.bottleneck, Bottleneck::Balanced);
}

#[test]
fn report_over_reference_batch() {
    let mut config = AnalyzerConfig::default();
    config.simulation.frame_count = 3;
    config.simulation.initial_head = 53;

    let report =
        AnalysisReport::from_batch(&[reference_process()], &config, &MetricsOverride::default())
            .unwrap();
    assert_eq!(report.analysis.bottleneck, Bottleneck::DiskIo);
    assert_eq!(report.suggestion, suggestion_for_label("Disk I/O Bottleneck"));
    assert!(report.narration().starts_with("Detected Disk I/O Bottleneck."));
}

#[test]
fn empty_batch_is_balanced() {
    let memory = simulate_memory(&[], 12).unwrap();
    let disk = simulate_disk(&[], 100);
    assert_eq!(memory.fifo + memory.lru + memory.optimal + memory.total_references, 0);
    assert_eq!(memory.page_fault_rate, 0.0);
    assert_eq!(disk.fcfs + disk.sstf, 0);
    assert_eq!(disk.average_seek, 0.0);

    let result = analyze_performance(
        &MemoryMetrics::from(&memory),
        &DiskMetrics::from(&disk),
        Thresholds::default(),
    );
    assert_eq!(result.bottleneck, Bottleneck::Balanced);
}

#[test]
fn memory_percent_boundary() {
    let at = MemoryMetrics {
        memory_percent: Some(85.0),
        ..Default::default()
    };
    let above = MemoryMetrics {
        memory_percent: Some(85.01),
        ..Default::default()
    };
    let disk = DiskMetrics::default();
    let thresholds = Thresholds::default();

    assert_ne!(analyze_performance(&at, &disk, thresholds).bottleneck, Bottleneck::Ram);
    assert_eq!(analyze_performance(&above, &disk, thresholds).bottleneck, Bottleneck::Ram);
}

#[test]
fn external_metrics_from_json() {
    let memory: MemoryMetrics =
        serde_json::from_str(r#"{"page_fault_rate": 0.42, "memory_percent": 42.0, "FIFO": 900.0, "LRU": 855.0}"#)
            .unwrap();
    let disk: DiskMetrics = serde_json::from_str(r#"{"FCFS": 1200, "request_count": 120}"#).unwrap();

    let report = AnalysisReport::from_metrics(memory, disk, Thresholds::default());
    assert_eq!(report.analysis.bottleneck, Bottleneck::DiskIo);
    assert_eq!(report.analysis.context.memory_percent, 42.0);
    assert_eq!(report.analysis.context.optimal_faults, 0.0);
}

#[test]
fn metrics_files_load() {
    let dir = std::env::temp_dir().join(format!("bottleneck-analyzer-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("memory.json");
    std::fs::write(&path, r#"{"memory_percent": 96.5}"#).unwrap();

    let memory = MemoryMetrics::load(&path).unwrap();
    assert_eq!(memory.memory_percent, Some(96.5));

    std::fs::write(&path, "not json").unwrap();
    assert!(MemoryMetrics::load(&path).is_err());
    assert!(DiskMetrics::load(dir.join("missing.json")).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
