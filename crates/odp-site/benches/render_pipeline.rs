//! Benchmarks for the render pipeline.

use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use odp_site::{
    DatasetConfig, IndexContext, RenderSink, Renderer, Row, RowContext, SinkError,
    natural_compare, slug_to_breadcrumb,
};

/// Discards every page so the benchmark measures the pass itself.
struct NullSink;

impl RenderSink for NullSink {
    fn render_row(&mut self, _path: &Path, _context: &RowContext) -> Result<(), SinkError> {
        Ok(())
    }

    fn render_index(&mut self, _path: &Path, _context: &IndexContext) -> Result<(), SinkError> {
        Ok(())
    }
}

fn config() -> DatasetConfig {
    let mut config = DatasetConfig::new("dataset-name", "dataset-name");
    config.group_field = Some("organisation".to_owned());
    config
}

/// Build rows spread across `organisations` nested slug branches.
fn build_rows(count: usize, organisations: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let organisation = format!("org-{}", i % organisations);
            Row::new()
                .with("dataset-name", format!("REF{i:05}"))
                .with("name", format!("Item {i}"))
                .with("organisation", organisation.clone())
                .with("slug", format!("/dataset-name/{organisation}/REF{i:05}"))
        })
        .collect()
}

fn bench_render_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pass");

    for (count, label) in [(100, "small"), (1_000, "medium"), (5_000, "large")] {
        let rows = build_rows(count, 12);

        group.bench_with_input(BenchmarkId::new("rows", label), &rows, |b, rows| {
            b.iter_with_setup(
                || (Renderer::new(config(), NullSink).unwrap(), rows.clone()),
                |(mut renderer, rows)| renderer.render(rows).unwrap(),
            )
        });
    }

    group.finish();
}

fn bench_breadcrumbs(c: &mut Criterion) {
    let mut group = c.benchmark_group("breadcrumbs");

    group.bench_function("depth_2", |b| {
        b.iter(|| slug_to_breadcrumb("/dataset-name/REF01", Some("REF01")))
    });

    group.bench_function("depth_5", |b| {
        b.iter(|| {
            slug_to_breadcrumb("/dataset-name/region/area/org-one/REF01", Some("REF01"))
        })
    });

    group.finish();
}

fn bench_natural_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("natural_order");

    group.bench_function("compare", |b| {
        b.iter(|| natural_compare("REF-00010-A", "REF-0002-B"))
    });

    for (count, label) in [(100, "small"), (1_000, "medium")] {
        let references: Vec<String> = (0..count).rev().map(|i| format!("REF{i}")).collect();

        group.bench_with_input(
            BenchmarkId::new("sort", label),
            &references,
            |b, references| {
                b.iter_with_setup(
                    || references.clone(),
                    |mut references| {
                        references.sort_by(|a, b| natural_compare(a, b));
                        references
                    },
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_pass,
    bench_breadcrumbs,
    bench_natural_order,
);

criterion_main!(benches);
