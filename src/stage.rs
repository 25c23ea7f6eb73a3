//! Render-target capability interface.
//!
//! The engine never touches a real document tree. Everything with a platform
//! effect — node insertion, transforms, layout, frame scheduling, timers,
//! style injection, control interception — goes through `Stage`, implemented
//! by the embedding adapter (a DOM adapter in a browser shell, a fake in
//! tests). Completions flow back as `StageEvent`s.
//!
//! Scheduling model: single logical thread, cooperative. `request_frame` and
//! `set_cleanup_timer` only *arm* callbacks; the adapter delivers the
//! matching `StageEvent` later, one at a time, never reentrantly.

use std::time::Duration;

use anyhow::Result;

use crate::overlay::Overlay;
use crate::plan::TrackOffset;

/// Asynchronous completions delivered by the stage adapter to
/// [`crate::engine::GhostWrap::on_stage_event`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StageEvent {
    /// The animation-frame callback armed by `request_frame` fired.
    Frame,
    /// The track's transform transition signalled completion.
    TransitionEnd,
    /// The cleanup safety timer armed by `set_cleanup_timer` expired.
    Timeout,
}

/// Platform effects the transition engine needs, and nothing more.
pub trait Stage {
    // -- overlay -----------------------------------------------------------

    /// Insert the overlay into the document over the viewer, with the track
    /// positioned at `at` and transitions disabled.
    fn insert_overlay(&mut self, overlay: &Overlay, at: TrackOffset) -> Result<()>;

    /// Remove the overlay from the document. Must tolerate being called
    /// when no overlay is present.
    fn remove_overlay(&mut self);

    /// Force a synchronous layout of the inserted overlay, so the start
    /// position is committed before the animated move. Without this the
    /// platform may coalesce start and end into a single frame and skip
    /// the animation entirely.
    fn force_layout(&mut self);

    /// Re-enable transitions and slide the track to `to`.
    fn animate_track_to(&mut self, to: TrackOffset) -> Result<()>;

    /// Arm a callback for the next animation-frame opportunity, delivered
    /// as [`StageEvent::Frame`].
    fn request_frame(&mut self);

    // -- cleanup safety timer ---------------------------------------------

    /// Arm the cleanup safety timer, delivered as [`StageEvent::Timeout`]
    /// after `after`. Re-arming replaces the previous timer.
    fn set_cleanup_timer(&mut self, after: Duration);

    /// Disarm the cleanup safety timer, if armed.
    fn clear_cleanup_timer(&mut self);

    // -- scoped styling (lifecycle binder) --------------------------------

    /// Inject the scoped stylesheet into the document.
    fn inject_style(&mut self, css: &str) -> Result<()>;

    /// Remove the injected stylesheet, if present.
    fn remove_style(&mut self);

    /// Tag the viewer root with the scope identifier.
    fn set_scope_tag(&mut self, scope_id: &str);

    /// Remove the scope tag from the viewer root.
    fn remove_scope_tag(&mut self);

    // -- control interception (lifecycle binder) --------------------------

    /// Start intercepting clicks on the host's prev/next controls, routed
    /// to [`crate::binder::ArrowBinder::handle_click`]. Intercepted clicks
    /// never reach the host's default handler.
    fn intercept_controls(&mut self);

    /// Stop intercepting the host's prev/next controls.
    fn release_controls(&mut self);
}
