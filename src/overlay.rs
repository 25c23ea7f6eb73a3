//! Ghost overlay — the transient three-slot strip and its scoped styling.
//!
//! The overlay is a value-level description of the node tree the stage
//! inserts: a container covering the viewer, a 300%-wide track, and three
//! slots of a third each. The stage renders it; this module only builds it.

use rand::Rng;

use crate::options::Options;
use crate::plan::TransitionPlan;
use crate::preload::PreloadedImage;

/// One slot of the ghost track. An empty image renders as an empty slot.
pub struct Slot {
    /// Item index this slot displays.
    pub index: usize,
    /// Decoded image, exclusively owned here; dropped with the overlay.
    pub image: Option<PreloadedImage>,
}

/// The transient strip inserted over the viewer for one transition.
/// At most one exists at a time (enforced by the engine's phase).
pub struct Overlay {
    pub slots: [Slot; 3],
}

impl Overlay {
    /// Assemble the strip from a plan and its three settled preloads,
    /// in display order A, B, C.
    pub fn build(plan: &TransitionPlan, images: [Option<PreloadedImage>; 3]) -> Overlay {
        let [a, b, c] = images;
        Overlay {
            slots: [
                Slot { index: plan.slots[0], image: a },
                Slot { index: plan.slots[1], image: b },
                Slot { index: plan.slots[2], image: c },
            ],
        }
    }

    /// Number of slots that actually carry an image.
    pub fn filled_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.image.is_some()).count()
    }
}

/// Generate a fresh scope identifier for one viewer instance.
///
/// The id tags the viewer root so that injected style never leaks into a
/// second viewer on the same page.
pub fn new_scope_id() -> String {
    let suffix: u64 = rand::rng().random();
    format!("pswp-aa_{suffix:012x}")
}

/// Build the scoped stylesheet for one viewer instance.
///
/// Everything is keyed on `[data-aa="{scope_id}"]` plus the configured class
/// prefix. The container sits above the host UI and ignores pointer events;
/// the track carries the transform transition.
pub fn build_css(options: &Options, scope_id: &str) -> String {
    let scope = format!("[data-aa=\"{scope_id}\"]");
    let prefix = &options.class_prefix;
    let duration_ms = options.animation_duration.as_millis();
    let easing = &options.easing;

    format!(
        "{scope} .{prefix}-ghost {{\n\
         \x20   position: absolute; inset: 0; z-index: 10000;\n\
         \x20   overflow: hidden; background: transparent !important; pointer-events: none;\n\
         }}\n\
         {scope} .{prefix}-ghost-track {{\n\
         \x20   position: absolute; top: 0; left: 0; height: 100%; width: 300%;\n\
         \x20   display: flex;\n\
         \x20   transition: transform {duration_ms}ms {easing};\n\
         \x20   will-change: transform;\n\
         }}\n\
         {scope} .{prefix}-ghost-slide {{\n\
         \x20   flex: 0 0 33.3333%; height: 100%;\n\
         \x20   display: flex; align-items: center; justify-content: center;\n\
         }}\n\
         {scope} .{prefix}-ghost-slide img {{\n\
         \x20   width: 100%; height: 100%; object-fit: contain; display: block;\n\
         }}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NavigationDirection;
    use crate::preload::tests::{LoadScript, ScriptedBackend};
    use crate::preload::{ImageBackend, preload_all};

    #[test]
    fn build_keeps_display_order_and_ownership() {
        let plan = TransitionPlan::compute(NavigationDirection::Next, 4, 5).unwrap();
        let backend = ScriptedBackend::new(&[
            ("a.jpg", LoadScript::Decodes),
            ("c.jpg", LoadScript::Decodes),
        ]);
        let sources = [Some("a.jpg".to_string()), None, Some("c.jpg".to_string())];
        let overlay = Overlay::build(&plan, preload_all(&backend, &sources));

        assert_eq!(overlay.slots[0].index, 3);
        assert_eq!(overlay.slots[1].index, 4);
        assert_eq!(overlay.slots[2].index, 0);
        assert!(overlay.slots[0].image.is_some());
        assert!(overlay.slots[1].image.is_none());
        assert!(overlay.slots[2].image.is_some());
        assert_eq!(overlay.filled_slots(), 2);
    }

    #[test]
    fn css_is_scoped_and_prefixed() {
        let options = Options::default();
        let css = build_css(&options, "pswp-aa_0000deadbeef");
        assert!(css.contains("[data-aa=\"pswp-aa_0000deadbeef\"] .pswp-animated-ghost {"));
        assert!(css.contains(".pswp-animated-ghost-track"));
        assert!(css.contains(".pswp-animated-ghost-slide"));
        assert!(css.contains("width: 300%"));
        assert!(css.contains("flex: 0 0 33.3333%"));
        assert!(css.contains("transition: transform 333ms ease"));
        assert!(css.contains("pointer-events: none"));
    }

    #[test]
    fn css_honors_configured_duration_and_prefix() {
        let options = crate::options::OptionsFile {
            animation_duration_ms: Some(500),
            easing: Some("linear".into()),
            class_prefix: Some("gallery".into()),
        }
        .resolve();
        let css = build_css(&options, "pswp-aa_1");
        assert!(css.contains("transition: transform 500ms linear"));
        assert!(css.contains(".gallery-ghost "));
        assert!(!css.contains("pswp-animated"));
    }

    #[test]
    fn scope_ids_are_unique_per_call() {
        let a = new_scope_id();
        let b = new_scope_id();
        assert!(a.starts_with("pswp-aa_"));
        assert_ne!(a, b);
    }

    #[test]
    fn dropping_the_overlay_drops_its_images() {
        let plan = TransitionPlan::compute(NavigationDirection::Prev, 0, 3).unwrap();
        let backend = ScriptedBackend::new(&[("a.jpg", LoadScript::Decodes)]);
        let images = [Some(backend.open("a.jpg")), None, None];
        let overlay = Overlay::build(&plan, images);
        assert_eq!(overlay.filled_slots(), 1);
        drop(overlay); // slot images go with it
    }
}
