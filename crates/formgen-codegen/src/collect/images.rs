//! Image collection: embedded data, header includes and helper needs.

use std::collections::BTreeSet;

use formgen_core::{AssetCache, CoreError, DesignTree, ImageDescription, ImageKind, Node, PropName};

use crate::context::{GenerationContext, ImageNeeds};
use crate::error::Result;

/// Result of the image header pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageHeaders {
    /// Paths of header and XPM images to `#include`.
    pub includes: BTreeSet<String>,
    pub warnings: Vec<String>,
}

/// Resolve every image and animation property under the form.
///
/// Embedded images are added to the context's list. A missing file or a malformed
/// property only produces a warning; failing to re-read a changed file is fatal.
pub fn collect_image_headers(ctx: &GenerationContext<'_>, cache: &AssetCache, art_directory: &str) -> Result<ImageHeaders> {
    let tree = ctx.tree();
    let mut headers = ImageHeaders::default();
    for id in tree.descendants(ctx.form().id()) {
        let node = tree.node(id);
        for prop in node.props().iter().filter(|prop| prop.prop_type().is_image_like()) {
            if prop.value.is_empty() {
                continue;
            }
            let description = match ImageDescription::parse(&prop.value) {
                Ok(description) => description,
                Err(err) => {
                    headers.warnings.push(err.to_string());
                    continue;
                }
            };
            match description.kind {
                ImageKind::Embed | ImageKind::Svg => match cache.resolve_description(&description) {
                    Ok(Some(asset)) => {
                        ctx.add_embedded_image(&asset, cache)?;
                    }
                    Ok(None) => headers
                        .warnings
                        .push(format!("Unable to locate image file: {}", description.path)),
                    Err(err @ CoreError::AssetIo { .. }) => return Err(err.into()),
                    Err(err) => headers.warnings.push(err.to_string()),
                },
                ImageKind::Header | ImageKind::Xpm => {
                    headers.includes.insert(include_path(&description.path, art_directory));
                }
                ImageKind::Art => {}
            }
        }
    }
    Ok(headers)
}

/// Path used in the `#include`: relative to the art directory when the image
/// lives under it.
pub fn include_path(path: &str, art_directory: &str) -> String {
    let art_directory = art_directory.trim_end_matches(['/', '\\']);
    if art_directory.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(art_directory) {
        Some(rest) if rest.starts_with(['/', '\\']) => rest[1..].to_string(),
        _ => path.to_string(),
    }
}

/// Decide which image helper functions the form needs.
pub fn image_needs(tree: &DesignTree, form: &Node) -> ImageNeeds {
    let mut needs = ImageNeeds::default();

    if let Ok(icon) = ImageDescription::parse(form.as_str(PropName::Icon)) {
        match icon.kind {
            ImageKind::Header | ImageKind::Xpm if !icon.is_xpm_file() => needs.header_function = true,
            ImageKind::Art => needs.art_provider = true,
            ImageKind::Embed => needs.image_function = true,
            ImageKind::Svg => needs.svg_function = true,
            _ => {}
        }
    }

    for id in tree.descendants(form.id()).into_iter().skip(1) {
        let node = tree.node(id);
        for prop in node.props().iter().filter(|prop| prop.prop_type().is_image_like()) {
            let Ok(image) = ImageDescription::parse(&prop.value) else {
                continue;
            };
            let animation = prop.name == PropName::Animation;
            match image.kind {
                ImageKind::Embed if animation => needs.animation_function = true,
                ImageKind::Embed => needs.image_function = true,
                ImageKind::Svg => needs.svg_function = true,
                ImageKind::Header if animation => needs.animation_function = true,
                ImageKind::Header if !image.is_xpm_file() => needs.header_function = true,
                ImageKind::Art => needs.art_provider = true,
                _ => {}
            }
        }
    }
    needs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::GenLang;
    use formgen_core::{GenName, MemoryAssetSource, NodeBuilder};
    use std::sync::Arc;
    use std::time::SystemTime;

    fn cache(files: &[&str]) -> AssetCache {
        let source = MemoryAssetSource::new();
        for file in files {
            source.insert_at(*file, vec![0u8; 4], SystemTime::UNIX_EPOCH);
        }
        AssetCache::new(source)
    }

    fn form(children: Vec<NodeBuilder>) -> DesignTree {
        DesignTree::new(
            NodeBuilder::new(GenName::Project).with_child(
                NodeBuilder::new(GenName::Dialog)
                    .with_prop(PropName::ClassName, "Images")
                    .with_children(children),
            ),
        )
    }

    #[test]
    fn test_headers_and_embedded() {
        let tree = form(vec![
            NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "Embed;art/ok.png"),
            NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "Embed;art/ok.png;[16,16]"),
            NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "XPM;art/open.xpm"),
            NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "Header;art/save_png.h"),
            NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "Embed;art/missing.png"),
            NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "Bogus;x"),
            NodeBuilder::new(GenName::AnimationCtrl).with_prop(PropName::Animation, "Embed;art/spin.gif"),
        ]);
        let cache = cache(&["art/ok.png", "art/spin.gif"]);
        let ctx = GenerationContext::new(&tree, tree.forms()[0], GenLang::Cpp).unwrap();
        let headers = collect_image_headers(&ctx, &cache, "art").unwrap();

        assert_eq!(ctx.embedded_image_count(), 2);
        assert_eq!(
            headers.includes.iter().cloned().collect::<Vec<_>>(),
            vec!["open.xpm".to_string(), "save_png.h".to_string()]
        );
        assert_eq!(headers.warnings.len(), 2);
        assert!(headers.warnings[0].contains("art/missing.png"));
    }

    #[test]
    fn test_include_path() {
        assert_eq!(include_path("art/x.xpm", "art/"), "x.xpm");
        assert_eq!(include_path("artwork/x.xpm", "art"), "artwork/x.xpm");
        assert_eq!(include_path("x.xpm", ""), "x.xpm");
    }

    #[test]
    fn test_needs() {
        let tree = DesignTree::new(
            NodeBuilder::new(GenName::Frame)
                .with_prop(PropName::Icon, "Art;wxART_FILE_OPEN|wxART_FRAME_ICON")
                .with_child(NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "SVG;a.svg"))
                .with_child(NodeBuilder::new(GenName::AnimationCtrl).with_prop(PropName::Animation, "Header;spin_gif.h"))
                .with_child(NodeBuilder::new(GenName::Button).with_prop(PropName::Bitmap, "XPM;b.xpm")),
        );
        let needs = image_needs(&tree, tree.root_node());
        assert!(needs.art_provider);
        assert!(needs.svg_function);
        assert!(needs.animation_function);
        assert!(!needs.header_function);
        assert!(!needs.image_function);
    }

    #[test]
    fn test_header_icon_needs_header_function() {
        let tree = DesignTree::new(NodeBuilder::new(GenName::Frame).with_prop(PropName::Icon, "Header;icon_png.h"));
        assert!(image_needs(&tree, tree.root_node()).header_function);
        let tree = DesignTree::new(NodeBuilder::new(GenName::Frame).with_prop(PropName::Icon, "XPM;icon.xpm"));
        assert!(!image_needs(&tree, tree.root_node()).any());
    }

    #[test]
    fn test_shared_cache_across_contexts() {
        let tree = form(vec![NodeBuilder::new(GenName::StaticBitmap).with_prop(PropName::Bitmap, "Embed;a.png")]);
        let cache = Arc::new(cache(&["a.png"]));
        let first = GenerationContext::new(&tree, tree.forms()[0], GenLang::Cpp).unwrap();
        let second = GenerationContext::new(&tree, tree.forms()[0], GenLang::Python).unwrap();
        collect_image_headers(&first, &cache, "").unwrap();
        collect_image_headers(&second, &cache, "").unwrap();
        assert_eq!(first.embedded_image_count(), 1);
        assert_eq!(second.embedded_image_count(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(first.embedded_images()[0].id(), second.embedded_images()[0].id());
    }
}
