// Performance benchmarks for the sigflow analysis pipeline
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sigflow::{
    analyze, find_forward_paths, find_unique_loops, Algebra, EdgeSpec, FlowGraph, NodeSpec,
};

fn ladder(stages: usize) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
    // Cascade S0 -> S1 -> ... with a feedback edge across every stage:
    // stages of forward gain interacting with overlapping loops.
    let nodes: Vec<NodeSpec> = (0..=stages)
        .map(|i| NodeSpec { id: format!("S{i}") })
        .collect();
    let mut edges = Vec::new();
    for i in 0..stages {
        edges.push(EdgeSpec {
            source: format!("S{i}"),
            target: format!("S{}", i + 1),
            label: format!("g{i}"),
        });
        edges.push(EdgeSpec {
            source: format!("S{}", i + 1),
            target: format!("S{i}"),
            label: format!("-h{i}"),
        });
    }
    (nodes, edges)
}

fn benchmark_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration");

    for stages in [4, 8, 16].iter() {
        let (nodes, edges) = ladder(*stages);
        let graph = FlowGraph::build(&Algebra, &nodes, &edges).unwrap();
        let sink = format!("S{stages}");

        group.bench_with_input(BenchmarkId::new("forward_paths", stages), stages, |b, _| {
            b.iter(|| {
                let paths = find_forward_paths(&graph, "S0", &sink).unwrap();
                black_box(paths.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("unique_loops", stages), stages, |b, _| {
            b.iter(|| {
                let loops = find_unique_loops(&graph);
                black_box(loops.len())
            });
        });
    }

    group.finish();
}

fn benchmark_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for stages in [2, 4, 6].iter() {
        let (nodes, edges) = ladder(*stages);
        let sink = format!("S{stages}");

        group.bench_with_input(BenchmarkId::new("ladder", stages), stages, |b, _| {
            b.iter(|| {
                let report = analyze(&Algebra, &nodes, &edges, "S0", &sink).unwrap();
                black_box(report.transfer_function.numeric_value.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_enumeration, benchmark_analyze);
criterion_main!(benches);
