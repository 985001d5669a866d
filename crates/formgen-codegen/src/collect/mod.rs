//! Collection passes.
//!
//! Each pass walks the form's subtree and builds one of the auxiliary tables the
//! emitter needs. The event, image header and image needs passes only read the
//! tree, so they run concurrently; [`run_concurrent_passes`] returns once all three
//! have finished.

mod events;
mod ids;
mod images;
mod members;

pub use events::{collect_events, EventTables};
pub use ids::{collect_ids, IdSets};
pub use images::{collect_image_headers, image_needs, include_path, ImageHeaders};
pub use members::{collect_members, MemberSets};

use formgen_core::AssetCache;

use crate::context::{GenerationContext, ImageNeeds};
use crate::error::{CodegenError, Result};

/// Outputs of the three concurrent passes.
#[derive(Debug)]
pub struct ConcurrentPasses<'t> {
    pub events: EventTables<'t>,
    pub headers: ImageHeaders,
    pub needs: ImageNeeds,
}

/// Run the event, image header and image needs passes.
///
/// With `parallel` set the passes run on the rayon pool; either way every pass
/// has completed when this returns.
pub fn run_concurrent_passes<'t>(
    ctx: &GenerationContext<'t>,
    cache: &AssetCache,
    art_directory: &str,
    parallel: bool,
) -> Result<ConcurrentPasses<'t>> {
    let tree = ctx.tree();
    let form = ctx.form();

    let event_pass = || collect_events(tree, form);
    let header_pass = || collect_image_headers(ctx, cache, art_directory);
    let needs_pass = || image_needs(tree, form);

    let (events, (headers, needs)) = if parallel {
        rayon::join(event_pass, || rayon::join(header_pass, needs_pass))
    } else {
        (event_pass(), (header_pass(), needs_pass()))
    };

    let headers = headers.map_err(|err| CodegenError::CollectionPass {
        pass: "image header",
        source: Box::new(err),
    })?;

    Ok(ConcurrentPasses { events, headers, needs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::GenLang;
    use formgen_core::{DesignTree, GenName, MemoryAssetSource, NodeBuilder, PropName};
    use std::collections::BTreeSet;
    use std::time::SystemTime;

    /// A wide tree with `count` nodes referring to `distinct` different images.
    fn image_tree(count: usize, distinct: usize) -> (DesignTree, AssetCache) {
        let source = MemoryAssetSource::new();
        for index in 0..distinct {
            source.insert_at(format!("img/i{index}.png"), vec![index as u8], SystemTime::UNIX_EPOCH);
        }
        let mut sizer = NodeBuilder::new(GenName::VerticalBoxSizer);
        for index in 0..count {
            let image = format!("Embed;img/i{}.png", index % distinct);
            sizer = sizer.with_child(
                NodeBuilder::new(GenName::StaticBitmap)
                    .with_prop(PropName::Bitmap, image)
                    .with_event("wxEVT_LEFT_DOWN", format!("OnClick{}", index % 7)),
            );
        }
        let tree = DesignTree::new(
            NodeBuilder::new(GenName::Project).with_child(
                NodeBuilder::new(GenName::PanelForm)
                    .with_prop(PropName::ClassName, "Gallery")
                    .with_child(sizer),
            ),
        );
        (tree, AssetCache::new(source))
    }

    fn image_ids(ctx: &GenerationContext<'_>) -> BTreeSet<String> {
        ctx.embedded_images().iter().map(|a| a.filename().to_string()).collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (tree, cache) = image_tree(10_000, 500);
        let form = tree.forms()[0];

        let parallel_ctx = GenerationContext::new(&tree, form, GenLang::Cpp).unwrap();
        let parallel = run_concurrent_passes(&parallel_ctx, &cache, "", true).unwrap();

        let sequential_ctx = GenerationContext::new(&tree, form, GenLang::Cpp).unwrap();
        let sequential = run_concurrent_passes(&sequential_ctx, &cache, "", false).unwrap();

        assert_eq!(parallel_ctx.embedded_image_count(), 500);
        assert_eq!(image_ids(&parallel_ctx), image_ids(&sequential_ctx));
        assert_eq!(parallel.needs, sequential.needs);
        assert_eq!(
            parallel.events.events.unconditional.len(),
            sequential.events.events.unconditional.len()
        );
        assert_eq!(parallel.headers, sequential.headers);
    }

    #[test]
    fn test_failed_reencode_is_fatal() {
        struct Flaky;
        impl formgen_core::AssetSource for Flaky {
            fn modified(&self, _path: &str) -> Option<SystemTime> {
                Some(SystemTime::now())
            }
            fn load(&self, path: &str) -> std::io::Result<Vec<u8>> {
                Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, path.to_string()))
            }
        }

        let tree = DesignTree::new(
            NodeBuilder::new(GenName::Dialog)
                .with_child(NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "Embed;x.png")),
        );
        let ctx = GenerationContext::new(&tree, tree.root(), GenLang::Cpp).unwrap();
        let cache = AssetCache::new(Flaky);
        let err = run_concurrent_passes(&ctx, &cache, "", true).unwrap_err();
        assert!(matches!(err, CodegenError::CollectionPass { pass: "image header", .. }));
    }
}
