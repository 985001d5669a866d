//! Collection pass benchmarks.

use std::sync::Arc;
use std::time::SystemTime;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formgen_codegen::collect::run_concurrent_passes;
use formgen_codegen::{GenLang, GenerationContext};
use formgen_core::{AssetCache, DesignTree, GenName, MemoryAssetSource, NodeBuilder, PropName};

/// 10,000 bitmaps spread over 500 images, in nested sizers.
fn wide_tree() -> (DesignTree, AssetCache) {
    let source = MemoryAssetSource::new();
    for index in 0..500 {
        source.insert_at(format!("art/img{index}.png"), vec![index as u8; 64], SystemTime::UNIX_EPOCH);
    }
    let mut form = NodeBuilder::new(GenName::PanelForm).with_prop(PropName::ClassName, "Wide");
    for row in 0..100 {
        let mut sizer = NodeBuilder::new(GenName::BoxSizer);
        for column in 0..100 {
            let index = row * 100 + column;
            sizer = sizer.with_child(
                NodeBuilder::new(GenName::StaticBitmap)
                    .with_prop(PropName::VarName, format!("m_bitmap{index}"))
                    .with_prop(PropName::Bitmap, format!("Embed;art/img{}.png", index % 500))
                    .with_event("wxEVT_LEFT_DOWN", "OnClick"),
            );
        }
        form = form.with_child(sizer);
    }
    let tree = DesignTree::new(NodeBuilder::new(GenName::Project).with_child(form));
    (tree, AssetCache::new(Arc::new(source)))
}

fn collect(c: &mut Criterion, name: &str, parallel: bool) {
    let (tree, cache) = wide_tree();
    let form = tree.forms()[0];
    c.bench_function(name, |b| {
        b.iter(|| {
            let ctx = GenerationContext::new(&tree, form, GenLang::Cpp).unwrap();
            let passes = run_concurrent_passes(&ctx, &cache, "", black_box(parallel)).unwrap();
            black_box((passes.needs, ctx.embedded_image_count()))
        })
    });
}

fn collect_sequential(c: &mut Criterion) {
    collect(c, "collect_sequential", false);
}

fn collect_parallel(c: &mut Criterion) {
    collect(c, "collect_parallel", true);
}

criterion_group!(benches, collect_sequential, collect_parallel);
criterion_main!(benches);
