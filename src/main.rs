use anyhow::Context;
use bottleneck_analyzer::config::{AnalyzerConfig, Range, Thresholds};
use bottleneck_analyzer::monitor::MonitorCollector;
use bottleneck_analyzer::{AnalysisReport, DiskMetrics, MemoryMetrics, MetricsOverride};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "bottleneck-analyzer")]
#[command(about = "Replay synthetic workloads through page-replacement and disk-scheduling policies and classify the bottleneck", long_about = None)]
struct Cli {
    /// JSON configuration file; command-line flags take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ThresholdArgs {
    /// FCFS seek total above which the disk is the bottleneck
    #[arg(long)]
    disk_threshold: Option<f64>,

    /// Memory pressure fraction above which RAM is the bottleneck (0.85 = 85%)
    #[arg(long)]
    memory_threshold: Option<f64>,
}

impl ThresholdArgs {
    fn apply(&self, thresholds: &mut Thresholds) {
        if let Some(disk) = self.disk_threshold {
            thresholds.disk = disk;
        }
        if let Some(memory) = self.memory_threshold {
            thresholds.memory = memory;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workload, simulate it and classify the result
    Simulate {
        /// Number of processes
        #[arg(short = 'p', long)]
        processes: Option<usize>,

        /// Memory requirement range, e.g. 128-512
        #[arg(long)]
        memory_range: Option<Range>,

        /// Page references per process
        #[arg(short = 'r', long)]
        reference_length: Option<usize>,

        /// Distinct pages (page ids are 0..PAGES)
        #[arg(long)]
        pages: Option<u32>,

        /// Disk requests per process
        #[arg(short = 'd', long)]
        disk_requests: Option<usize>,

        /// Disk track range, e.g. 0-499
        #[arg(long)]
        track_range: Option<Range>,

        /// Seed for a reproducible workload
        #[arg(short, long)]
        seed: Option<u64>,

        /// Resident page frames
        #[arg(short, long)]
        frames: Option<usize>,

        /// Initial disk head position
        #[arg(long)]
        head: Option<u32>,

        /// Replace the simulated memory pressure with this usage percentage
        #[arg(long)]
        memory_percent: Option<f64>,

        /// Replace the simulated FCFS seek total with this activity figure
        #[arg(long)]
        disk_activity: Option<f64>,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify memory and disk metrics read from JSON files
    Analyze {
        /// Memory metrics (keys: page_fault_rate, FIFO, LRU, Optimal, memory_percent)
        #[arg(short, long)]
        memory: Option<PathBuf>,

        /// Disk metrics (keys: FCFS, SSTF, request_count, average_seek)
        #[arg(short, long)]
        disk: Option<PathBuf>,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        #[arg(long)]
        json: bool,
    },
    /// Sample the running system and classify each sample
    Live {
        /// Number of samples; 0 runs until interrupted
        #[arg(short = 'n', long, default_value = "5")]
        samples: u64,

        /// Seconds between samples
        #[arg(short, long, default_value = "1.0")]
        interval: f64,

        /// Restrict disk counters to one block device (e.g. nvme0n1)
        #[arg(long)]
        device: Option<String>,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        #[arg(long)]
        json: bool,
    },
}

fn init_logging(config: &AnalyzerConfig) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_report(report: &AnalysisReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config)?;

    match cli.command {
        Commands::Simulate {
            processes,
            memory_range,
            reference_length,
            pages,
            disk_requests,
            track_range,
            seed,
            frames,
            head,
            memory_percent,
            disk_activity,
            thresholds,
            json,
        } => {
            let w = &mut config.workload;
            w.num_processes = processes.unwrap_or(w.num_processes);
            w.memory_range = memory_range.unwrap_or(w.memory_range);
            w.reference_length = reference_length.unwrap_or(w.reference_length);
            w.num_pages = pages.unwrap_or(w.num_pages);
            w.disk_request_count = disk_requests.unwrap_or(w.disk_request_count);
            w.disk_track_range = track_range.unwrap_or(w.disk_track_range);
            w.seed = seed.or(w.seed);

            let s = &mut config.simulation;
            s.frame_count = frames.unwrap_or(s.frame_count);
            s.initial_head = head.unwrap_or(s.initial_head);

            thresholds.apply(&mut config.thresholds);

            let overrides = MetricsOverride {
                memory_percent,
                disk_activity,
            };
            let report = AnalysisReport::simulate(&config, &overrides)?;
            print_report(&report, json)?;
        }
        Commands::Analyze {
            memory,
            disk,
            thresholds,
            json,
        } => {
            thresholds.apply(&mut config.thresholds);

            let memory = match memory {
                Some(path) => MemoryMetrics::load(&path)?,
                None => MemoryMetrics::default(),
            };
            let disk = match disk {
                Some(path) => DiskMetrics::load(&path)?,
                None => DiskMetrics::default(),
            };
            let report = AnalysisReport::from_metrics(memory, disk, config.thresholds);
            print_report(&report, json)?;
        }
        Commands::Live {
            samples,
            interval,
            device,
            thresholds,
            json,
        } => {
            if !(interval > 0.0 && interval.is_finite()) {
                anyhow::bail!("interval must be a positive number of seconds");
            }
            thresholds.apply(&mut config.thresholds);
            run_live(samples, Duration::from_secs_f64(interval), device, config.thresholds, json).await?;
        }
    }

    Ok(())
}

async fn run_live(
    samples: u64,
    interval: Duration,
    device: Option<String>,
    thresholds: Thresholds,
    json: bool,
) -> anyhow::Result<()> {
    let mut collector = MonitorCollector::new(device);
    let mut ticker = tokio::time::interval(interval);
    let mut taken = 0u64;

    while samples == 0 || taken < samples {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted after {taken} samples");
                break;
            }
        }

        let report = AnalysisReport::from_sample(collector.collect(), thresholds);
        taken += 1;
        if !json {
            println!("--- sample {taken} ---");
        }
        print_report(&report, json)?;
    }

    Ok(())
}
