use criterion::{black_box, criterion_group, criterion_main, Criterion};
use edaha::ui::layout_tree;
use edaha::{MindMap, NodeId};

/// 幅 `breadth` × 深さ `depth` のツリーを組み立てる
fn build_map(breadth: usize, depth: usize) -> MindMap {
    let mut map = MindMap::new();
    let root_id = map.root_id().clone();
    grow(&mut map, &root_id, breadth, depth);
    map
}

fn grow(map: &mut MindMap, parent: &NodeId, breadth: usize, depth: usize) {
    if depth == 0 {
        return;
    }
    for _ in 0..breadth {
        if let Some(child) = map.add_child(parent) {
            map.update_text(&child, "ノード");
            grow(map, &child, breadth, depth - 1);
        }
    }
}

fn benchmark_tree_rebuild(c: &mut Criterion) {
    // 3^6 + … ≒ 1000ノード。編集のたびに全体を作り直すコストを測る
    let map = build_map(3, 6);
    let ids = map.root().collect_ids();
    let deepest = ids.last().unwrap().clone();

    c.bench_function("tree_rebuild_update_text", |b| {
        b.iter(|| {
            let mut working = map.clone();
            working.update_text(black_box(&deepest), black_box("更新"));
        });
    });

    c.bench_function("tree_rebuild_add_child", |b| {
        b.iter(|| {
            let mut working = map.clone();
            working.add_child(black_box(&deepest));
        });
    });
}

fn benchmark_markdown_export(c: &mut Criterion) {
    let map = build_map(3, 6);

    c.bench_function("markdown_export", |b| {
        b.iter(|| black_box(map.to_markdown()));
    });
}

fn benchmark_layout(c: &mut Criterion) {
    let map = build_map(3, 5);

    c.bench_function("layout_tree", |b| {
        b.iter(|| black_box(layout_tree(map.root(), black_box(0.8))));
    });
}

criterion_group!(
    benches,
    benchmark_tree_rebuild,
    benchmark_markdown_export,
    benchmark_layout
);
criterion_main!(benches);
