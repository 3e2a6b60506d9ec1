//! `linkrank stats`: structural summary of the link graph, no scoring.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use linkrank_core::{GraphStats, LinkGraph};
use serde::Serialize;

use super::input::load_records;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `linkrank stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Crawl records: a JSON array, or JSON Lines for `.jsonl` files. `-` reads stdin.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,
}

/// Report payload for `linkrank stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Number of input records, before URL deduplication.
    pub record_count: usize,
    #[serde(flatten)]
    pub graph: GraphStats,
    pub content_hash: String,
}

/// Execute `linkrank stats`.
///
/// # Errors
///
/// Returns an error if the records cannot be loaded or are empty.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let records = load_records(&args.records)?;
    let graph = LinkGraph::from_records(&records)?;
    let payload = StatsReport {
        record_count: records.len(),
        graph: GraphStats::from_graph(&graph),
        content_hash: graph.content_hash().to_string(),
    };
    render_mode(output, &payload, render_stats_text, render_stats_pretty)
}

fn render_stats_text(report: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    let g = &report.graph;
    writeln!(w, "records {}", report.record_count)?;
    writeln!(w, "nodes {}", g.node_count)?;
    writeln!(w, "edges {}", g.edge_count)?;
    writeln!(w, "density {:.6}", g.density)?;
    writeln!(w, "weakly_connected {}", g.is_weakly_connected)?;
    writeln!(w, "components {}", g.weakly_connected_component_count)?;
    writeln!(w, "dangling {}", g.dangling_count)?;
    writeln!(w, "isolated {}", g.isolated_node_count)?;
    writeln!(w, "self_loops {}", g.self_loop_count)?;
    writeln!(w, "max_in_degree {}", g.max_in_degree)?;
    writeln!(w, "max_out_degree {}", g.max_out_degree)?;
    writeln!(w, "content_hash {}", report.content_hash)
}

fn render_stats_pretty(report: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    let g = &report.graph;
    pretty_section(w, "Link graph")?;
    pretty_kv(w, "Records", report.record_count.to_string())?;
    pretty_kv(w, "Pages", g.node_count.to_string())?;
    pretty_kv(w, "Links", g.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.6}", g.density))?;
    pretty_kv(w, "Components", g.weakly_connected_component_count.to_string())?;
    pretty_kv(w, "Dangling pages", g.dangling_count.to_string())?;
    pretty_kv(w, "Isolated pages", g.isolated_node_count.to_string())?;
    pretty_kv(w, "Self-loops", g.self_loop_count.to_string())?;
    pretty_kv(w, "Max in-degree", g.max_in_degree.to_string())?;
    pretty_kv(w, "Max out-degree", g.max_out_degree.to_string())?;
    pretty_kv(w, "Content hash", &report.content_hash)
}
