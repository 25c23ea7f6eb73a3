//! Image source resolution — best available URL for an item index.

use log::debug;

use crate::host::HostViewer;

/// Resolve the best available source for the item at `index`.
///
/// Resolution order:
///   1. the item's explicit `src`;
///   2. its element's link target, else the first descendant image's
///      currently displayed source, else that image's configured source;
///   3. the preview/thumbnail source.
///
/// Returns `None` when nothing applies or `index` is out of range. Pure
/// lookup: no side effects, deterministic for a fixed viewer state.
pub fn resolve_source(viewer: &dyn HostViewer, index: usize) -> Option<String> {
    let data = viewer.item_data(index)?;

    if let Some(src) = data.src {
        return Some(src);
    }

    if let Some(element) = data.element {
        if let Some(href) = element.link_target {
            return Some(href);
        }
        if let Some(current) = element.image_current_src {
            return Some(current);
        }
        if let Some(src) = element.image_src {
            return Some(src);
        }
    }

    if data.thumbnail_src.is_none() {
        debug!("resolve: no usable source for item {index}");
    }
    data.thumbnail_src
}
