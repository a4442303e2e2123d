use criterion::{Criterion, criterion_group, criterion_main};
use toctoctoc_engine::{
    DefaultRenderer, Document, HeadlineSelector, HierarchyBuilder, PrefixedIndexIds,
    collect_headings, parse_markdown,
};

fn generate_markdown(sections: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\nIntro paragraph.\n\n"));
        for level in 2..=6 {
            content.push_str(&format!("{} Level {level}\n\nBody text.\n\n", "#".repeat(level)));
        }
        content.push_str("## Back up\n\n");
    }
    content
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");
    group.sample_size(20);

    let content = generate_markdown(200);
    let doc = parse_markdown(&content).unwrap();
    let renderer = DefaultRenderer::default();
    let ids = PrefixedIndexIds::default();

    group.bench_function("collect_and_build", |b| {
        b.iter(|| {
            let mut doc: Document = doc.clone();
            let body = doc.body();
            let mut headings =
                collect_headings(&doc, body, &HeadlineSelector::default()).unwrap();
            let root = HierarchyBuilder::new(&renderer, &ids)
                .build(&mut doc, &mut headings, None)
                .unwrap();
            std::hint::black_box(root);
        });
    });

    group.bench_function("parse_markdown", |b| {
        b.iter(|| {
            let doc = parse_markdown(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(doc);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
