use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_editor::{BlockId, BlockRegistry, LayoutStore};
use pagecraft_schema::{BlockType, Device};
use serde_json::json;

fn populated_store(count: usize) -> (LayoutStore, Vec<BlockId>) {
    let registry = BlockRegistry::new();
    let mut store = LayoutStore::new("bench");
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let block_type = BlockType::ALL[i % BlockType::ALL.len()];
        let block = registry.create_block(block_type).unwrap();
        ids.push(block.id().clone());
        store.add_block(block).unwrap();
    }
    (store, ids)
}

fn move_blocks(c: &mut Criterion) {
    let (mut store, _) = populated_store(100);

    c.bench_function("move_block_100", |b| {
        b.iter(|| {
            store.move_block(black_box(0), black_box(99));
            store.move_block(black_box(99), black_box(0));
        })
    });
}

fn update_nested_config(c: &mut Criterion) {
    let registry = BlockRegistry::new();
    let mut store = LayoutStore::new("bench");
    let block = registry.create_block(BlockType::ProductCarousel).unwrap();
    let id = block.id().clone();
    store.add_block(block).unwrap();
    let patch = json!({ "header": { "text": "Hello", "height": 60 } });

    c.bench_function("update_block_config", |b| {
        b.iter(|| store.update_block_config(black_box(&id), black_box(&patch)))
    });
}

fn resolve_device_override(c: &mut Criterion) {
    let (mut store, ids) = populated_store(7);
    store.set_device(Device::Mobile);
    store
        .update_block_config(&ids[2], &json!({ "itemsPerView": 1.5 }))
        .unwrap();

    c.bench_function("resolve_mobile_override", |b| {
        b.iter(|| store.effective_config(black_box(&ids[2]), Device::Mobile))
    });
}

fn serialize_document(c: &mut Criterion) {
    let (store, _) = populated_store(50);

    c.bench_function("serialize_document_50", |b| {
        b.iter(|| serde_json::to_string(black_box(store.document())))
    });
}

criterion_group!(
    benches,
    move_blocks,
    update_nested_config,
    resolve_device_override,
    serialize_document
);
criterion_main!(benches);
