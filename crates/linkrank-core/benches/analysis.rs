use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linkrank_core::graph::LinkGraph;
use linkrank_core::metrics::betweenness::betweenness_centrality;
use linkrank_core::metrics::hits::{HitsConfig, hits};
use linkrank_core::metrics::pagerank::{PageRankConfig, pagerank};
use linkrank_core::{AnalysisConfig, PageRecord, analyze_graph};

struct Tier {
    name: &'static str,
    pages: usize,
    links_per_page: usize,
}

const TIERS: [Tier; 3] = [
    Tier {
        name: "small",
        pages: 100,
        links_per_page: 5,
    },
    Tier {
        name: "medium",
        pages: 1_000,
        links_per_page: 10,
    },
    Tier {
        name: "large",
        pages: 5_000,
        links_per_page: 12,
    },
];

fn synthetic_site(tier: &Tier, seed: u64) -> Vec<PageRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..tier.pages)
        .map(|i| {
            let links: Vec<String> = (0..tier.links_per_page)
                .map(|_| format!("https://bench.test/{}", rng.gen_range(0..tier.pages)))
                .collect();
            PageRecord::new(format!("https://bench.test/{i}")).with_links(links)
        })
        .collect()
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines");
    group.sample_size(20);

    for tier in &TIERS {
        let records = synthetic_site(tier, 0x11AC_u64 + tier.pages as u64);
        let graph = LinkGraph::from_records(&records).expect("build graph");
        group.throughput(Throughput::Elements(graph.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("build", tier.name), &records, |b, r| {
            b.iter(|| black_box(LinkGraph::from_records(r)))
        });
        group.bench_with_input(BenchmarkId::new("pagerank", tier.name), &graph, |b, g| {
            b.iter(|| black_box(pagerank(g, &PageRankConfig::default())))
        });
        group.bench_with_input(BenchmarkId::new("hits", tier.name), &graph, |b, g| {
            b.iter(|| black_box(hits(g, &HitsConfig::default())))
        });
        group.bench_with_input(BenchmarkId::new("betweenness", tier.name), &graph, |b, g| {
            b.iter(|| black_box(betweenness_centrality(g)))
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    for tier in &TIERS[..2] {
        let records = synthetic_site(tier, 0x11AC_u64 + tier.pages as u64);
        let graph = LinkGraph::from_records(&records).expect("build graph");
        let sequential = AnalysisConfig {
            parallel: false,
            ..AnalysisConfig::default()
        };

        group.bench_with_input(BenchmarkId::new("parallel", tier.name), &graph, |b, g| {
            b.iter(|| black_box(analyze_graph(g, &AnalysisConfig::default())))
        });
        group.bench_with_input(BenchmarkId::new("sequential", tier.name), &graph, |b, g| {
            b.iter(|| black_box(analyze_graph(g, &sequential)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engines, bench_pipeline);
criterion_main!(benches);
