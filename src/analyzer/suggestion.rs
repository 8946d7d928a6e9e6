use crate::analyzer::detector::{AnalysisResult, Bottleneck};

pub const BALANCED_SUGGESTION: &str =
    "System is balanced. Continue monitoring workload trends for emerging bottlenecks.";

/// Remediation for a bottleneck category.
pub fn suggestion_for(bottleneck: Bottleneck) -> &'static str {
    match bottleneck {
        Bottleneck::Ram => "Increase available RAM or switch to an LRU-based paging strategy.",
        Bottleneck::DiskIo => "Adopt SSTF scheduling or move intensive workloads to SSD storage.",
        Bottleneck::InefficientPageReplacement => "Replace FIFO with LRU or Optimal where possible.",
        Bottleneck::Balanced => BALANCED_SUGGESTION,
    }
}

/// Look up a suggestion by category label. Unknown labels get the
/// balanced-system message.
pub fn suggestion_for_label(label: &str) -> &'static str {
    Bottleneck::from_label(label)
        .map(suggestion_for)
        .unwrap_or(BALANCED_SUGGESTION)
}

/// Supporting lines for a result, followed by the suggestion.
pub fn recommendations(result: &AnalysisResult) -> Vec<String> {
    let ctx = &result.context;
    let mut lines = match result.bottleneck {
        Bottleneck::Ram => vec![
            format!("Memory utilization is {:.1}%", ctx.memory_percent),
            format!("Page fault rate is {:.3}", result.page_fault_rate),
        ],
        Bottleneck::DiskIo => vec![
            format!("FCFS seek distance is {:.0}", result.disk_seek_time),
            format!(
                "SSTF would need {:.0} across {:.0} requests",
                ctx.disk_sstf, ctx.request_count
            ),
        ],
        Bottleneck::InefficientPageReplacement => vec![format!(
            "FIFO caused {:.0} faults against {:.0} for LRU and {:.0} for Optimal",
            ctx.fifo_faults, ctx.lru_faults, ctx.optimal_faults
        )],
        Bottleneck::Balanced => Vec::new(),
    };
    lines.push(suggestion_for(result.bottleneck).to_string());
    lines
}
