//! Seamless "infinite loop" transitions for paginated media viewers.
//!
//! When the user advances past the last item (or retreats before the first)
//! of a looping viewer, the host would normally jump straight to the wrap
//! target. This crate replaces that jump with a ghost transition: a
//! transient three-slot strip is laid over the viewer with the current item
//! centered, the real viewer snaps to the wrap target while fully occluded,
//! and the strip slides one slot so the seam reads as continuous motion.
//!
//! The crate is headless. It owns the transition state machine, the image
//! preloading, the overlay description and the cleanup guarantees; every
//! platform effect goes through two capability traits the embedding adapter
//! implements:
//!
//! - [`stage::Stage`] — node insertion, transforms, frame scheduling,
//!   timers, style injection;
//! - [`preload::ImageBackend`] — image fetching and decoding.
//!
//! The host viewer itself is reached through [`host::HostViewer`]. A typical
//! embedding creates one [`binder::ArrowBinder`] per viewer, forwards the
//! viewer's init/destroy notifications to
//! [`binder::ArrowBinder::on_viewer_event`], routes intercepted arrow clicks
//! to [`binder::ArrowBinder::handle_click`], and delivers armed frame/timer
//! callbacks back as [`stage::StageEvent`]s.

pub mod binder;
pub mod engine;
pub mod host;
pub mod options;
pub mod overlay;
pub mod plan;
pub mod preload;
pub mod resolve;
pub mod stage;

pub use binder::ArrowBinder;
pub use engine::{GhostWrap, Phase};
pub use host::{HostViewer, ItemData, ItemElement, NavigationDirection, ViewerEvent};
pub use options::{Options, OptionsFile};
pub use stage::{Stage, StageEvent};
