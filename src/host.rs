//! Host paginated viewer abstraction.
//!
//! The crate never owns or renders slides; it reads the host viewer's state
//! and asks it to jump (`go_to`) or step (`move_by`). The embedding adapter
//! implements `HostViewer` over the real viewer instance.

/// Which boundary wrap is being animated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavigationDirection {
    Next,
    Prev,
}

/// Element-level metadata for an item, as far as source resolution needs it:
/// the link target of an anchor-style thumbnail, and the first descendant
/// image's displayed vs. configured source.
#[derive(Clone, Debug, Default)]
pub struct ItemElement {
    pub link_target: Option<String>,
    pub image_current_src: Option<String>,
    pub image_src: Option<String>,
}

/// Item metadata as exposed by the host viewer.
#[derive(Clone, Debug, Default)]
pub struct ItemData {
    /// Explicit full-size source, if the host knows it.
    pub src: Option<String>,
    /// The DOM-like element the item was built from, if any.
    pub element: Option<ItemElement>,
    /// Preview/thumbnail source, used as a last resort.
    pub thumbnail_src: Option<String>,
}

/// Read/control surface the host viewer must expose.
pub trait HostViewer {
    fn current_index(&self) -> usize;
    fn num_items(&self) -> usize;
    fn loop_enabled(&self) -> bool;

    /// Metadata for `index`, or `None` when out of range.
    fn item_data(&self, index: usize) -> Option<ItemData>;

    /// Instant index change, no animation. Synchronous from the caller's
    /// perspective.
    fn go_to(&mut self, index: usize);

    /// Default single-step navigation (the non-wrap case).
    fn move_by(&mut self, offset: isize);
}

/// Lifecycle notifications from the host viewer's event channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewerEvent {
    AfterInit,
    Destroy,
}
