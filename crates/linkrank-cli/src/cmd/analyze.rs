//! `linkrank analyze`: full link graph report.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use linkrank_core::{AnalysisConfig, GraphAnalysisReport, PageType, analyze};

use super::input::{load_config, load_records};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `linkrank analyze`.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Crawl records: a JSON array, or JSON Lines for `.jsonl` files. `-` reads stdin.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// TOML analysis config. Missing keys take their defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// PageRank damping factor, overriding the config file.
    #[arg(long)]
    pub damping: Option<f64>,

    /// Length of each top-K list, overriding the config file.
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Divide betweenness by (n-1)(n-2).
    #[arg(long)]
    pub normalize_betweenness: bool,

    /// Run the engines on the calling thread.
    #[arg(long)]
    pub sequential: bool,
}

impl AnalyzeArgs {
    /// The config file (or defaults) with command-line overrides applied.
    fn resolve_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = load_config(self.config.as_deref())?;
        apply_overrides(self, &mut config);
        Ok(config)
    }
}

fn apply_overrides(args: &AnalyzeArgs, config: &mut AnalysisConfig) {
    if let Some(damping) = args.damping {
        config.pagerank.damping = damping;
    }
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    if args.normalize_betweenness {
        config.normalize_betweenness = true;
    }
    if args.sequential {
        config.parallel = false;
    }
}

/// Execute `linkrank analyze`.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded, the config is invalid,
/// or the record set is empty.
pub fn run_analyze(args: &AnalyzeArgs, output: OutputMode) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let records = load_records(&args.records)?;
    let report = analyze(&records, &config)?;
    render_mode(output, &report, render_report_text, render_report_pretty)
}

fn render_report_text(report: &GraphAnalysisReport, w: &mut dyn Write) -> io::Result<()> {
    let stats = &report.graph_stats;
    writeln!(w, "nodes {}", stats.node_count)?;
    writeln!(w, "edges {}", stats.edge_count)?;
    writeln!(w, "density {:.6}", stats.density)?;
    writeln!(w, "weakly_connected {}", stats.is_weakly_connected)?;
    writeln!(
        w,
        "pagerank_converged {} {}",
        report.converged.pagerank, report.iterations.pagerank
    )?;
    writeln!(
        w,
        "hits_converged {} {}",
        report.converged.hits, report.iterations.hits
    )?;
    for (page_type, count) in report.page_types.counts() {
        writeln!(w, "page_type {page_type} {count}")?;
    }
    for (i, url) in report.top_k.pagerank.iter().enumerate() {
        writeln!(w, "top_pagerank {} {:.6} {url}", i + 1, report.pagerank[url])?;
    }
    for (i, url) in report.top_k.hubs.iter().enumerate() {
        writeln!(w, "top_hub {} {:.6} {url}", i + 1, report.hits.hub[url])?;
    }
    for (i, url) in report.top_k.authorities.iter().enumerate() {
        writeln!(w, "top_authority {} {:.6} {url}", i + 1, report.hits.authority[url])?;
    }
    for url in &report.page_types.orphan {
        writeln!(w, "orphan {url}")?;
    }
    for warning in &report.warnings {
        writeln!(w, "warning {warning}")?;
    }
    Ok(())
}

fn render_report_pretty(report: &GraphAnalysisReport, w: &mut dyn Write) -> io::Result<()> {
    let stats = &report.graph_stats;
    pretty_section(w, "Link graph")?;
    pretty_kv(w, "Pages", stats.node_count.to_string())?;
    pretty_kv(w, "Links", stats.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.6}", stats.density))?;
    pretty_kv(
        w,
        "Weakly connected",
        if stats.is_weakly_connected {
            "yes".to_string()
        } else {
            format!("no ({} components)", stats.weakly_connected_component_count)
        },
    )?;
    pretty_kv(w, "Dangling pages", stats.dangling_count.to_string())?;
    pretty_kv(w, "Content hash", &report.content_hash)?;
    writeln!(w)?;

    pretty_section(w, "Convergence")?;
    pretty_kv(
        w,
        "PageRank",
        convergence_line(report.converged.pagerank, report.iterations.pagerank),
    )?;
    pretty_kv(
        w,
        "HITS",
        convergence_line(report.converged.hits, report.iterations.hits),
    )?;
    writeln!(w)?;

    pretty_section(w, "Page types")?;
    for (page_type, count) in report.page_types.counts() {
        pretty_kv(w, page_type.as_str(), count.to_string())?;
    }
    writeln!(w)?;

    ranked_section(w, "Top PageRank", &report.top_k.pagerank, |u| {
        report.pagerank[u]
    })?;
    ranked_section(w, "Top hubs", &report.top_k.hubs, |u| report.hits.hub[u])?;
    ranked_section(w, "Top authorities", &report.top_k.authorities, |u| {
        report.hits.authority[u]
    })?;

    let orphans = report.page_types.get(PageType::Orphan);
    if !orphans.is_empty() {
        pretty_section(w, "Orphan pages")?;
        for url in orphans {
            writeln!(w, "  {url}")?;
        }
        writeln!(w)?;
    }

    if !report.warnings.is_empty() {
        pretty_section(w, "Warnings")?;
        for warning in &report.warnings {
            writeln!(w, "  ⚠ {warning}")?;
        }
    }
    Ok(())
}

fn convergence_line(converged: bool, iterations: usize) -> String {
    if converged {
        format!("converged in {iterations} iterations")
    } else {
        format!("stopped after {iterations} iterations (not converged)")
    }
}

fn ranked_section(
    w: &mut dyn Write,
    heading: &str,
    urls: &[String],
    score: impl Fn(&str) -> f64,
) -> io::Result<()> {
    pretty_section(w, heading)?;
    for (i, url) in urls.iter().enumerate() {
        writeln!(w, "{:>4}. {:.6}  {url}", i + 1, score(url))?;
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkrank_core::PageRecord;

    fn report() -> GraphAnalysisReport {
        let records = vec![
            PageRecord::new("/").with_links(["/a", "/b"]),
            PageRecord::new("/a").with_links(["/"]),
            PageRecord::new("/b").with_links(["/", "/a"]),
            PageRecord::new("/lost").with_links(["/"]),
        ];
        analyze(&records, &AnalysisConfig::default()).expect("analyze")
    }

    #[test]
    fn overrides_replace_config_values() {
        let args = AnalyzeArgs {
            damping: Some(0.5),
            top_k: Some(3),
            normalize_betweenness: true,
            sequential: true,
            ..AnalyzeArgs::default()
        };
        let mut config = AnalysisConfig::default();
        apply_overrides(&args, &mut config);
        assert!((config.pagerank.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.top_k, 3);
        assert!(config.normalize_betweenness);
        assert!(!config.parallel);
    }

    #[test]
    fn absent_overrides_keep_config_values() {
        let mut config = AnalysisConfig {
            top_k: 7,
            ..AnalysisConfig::default()
        };
        apply_overrides(&AnalyzeArgs::default(), &mut config);
        assert_eq!(config.top_k, 7);
        assert!(config.parallel);
    }

    #[test]
    fn text_output_lists_orphans_and_ranks() {
        let mut buf = Vec::new();
        render_report_text(&report(), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("nodes 4\n"));
        assert!(text.contains("orphan /lost\n"));
        assert!(text.contains("top_pagerank 1 "));
        assert!(text.contains("page_type orphan 1\n"));
    }

    #[test]
    fn pretty_output_has_sections() {
        let mut buf = Vec::new();
        render_report_pretty(&report(), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        for heading in ["Link graph", "Convergence", "Page types", "Top PageRank", "Orphan pages"] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(!text.contains("Warnings"));
    }
}
