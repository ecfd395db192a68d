//! Benchmarks for the per-keystroke editing path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use prodios::app::{App, Message, update};
use prodios::editor::Key;
use prodios::highlight::highlight;

fn sample_source(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("function f{i}(a, b) {{ return [a, b].map((x) => x * {i}); }}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_highlight(c: &mut Criterion) {
    let source = sample_source(500);
    c.bench_function("highlight_500_lines_js", |b| {
        b.iter(|| highlight(black_box(&source), black_box("js")));
    });
}

fn bench_keystroke(c: &mut Criterion) {
    let app = App::new().with_file_names(vec!["bench.ts".to_string()]);
    let source = sample_source(500);
    c.bench_function("keystroke_auto_close_500_lines", |b| {
        b.iter_batched(
            || {
                let model = app.initial_model((120, 40));
                update(model, Message::Paste(source.clone()))
            },
            |model| update(model, Message::KeyDown(black_box(Key::Char('(')))),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_highlight, bench_keystroke);
criterion_main!(benches);
