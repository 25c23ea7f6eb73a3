//! Lifecycle binder — wires the engine to the host viewer's lifecycle.
//!
//! On `AfterInit`: inject scoped style, tag the viewer root, intercept the
//! arrow controls. On `Destroy`: force-settle any in-flight transition and
//! undo all of it. Thin glue over `engine`; no transition logic lives here.

use log::{debug, warn};

use crate::engine::GhostWrap;
use crate::host::{HostViewer, NavigationDirection, ViewerEvent};
use crate::options::Options;
use crate::overlay::{build_css, new_scope_id};
use crate::preload::ImageBackend;
use crate::stage::{Stage, StageEvent};

/// Binds one engine instance to one viewer's init/destroy lifecycle and
/// arrow controls.
pub struct ArrowBinder {
    options: Options,
    engine: GhostWrap,
    scope_id: Option<String>,
}

impl ArrowBinder {
    pub fn new(options: Options) -> Self {
        let engine = GhostWrap::new(options.clone());
        Self { options, engine, scope_id: None }
    }

    /// The engine driving this binder's transitions.
    pub fn engine(&self) -> &GhostWrap {
        &self.engine
    }

    /// True between `AfterInit` and `Destroy`.
    pub fn is_bound(&self) -> bool {
        self.scope_id.is_some()
    }

    /// Scope identifier tagged onto the viewer root, while bound.
    pub fn scope_id(&self) -> Option<&str> {
        self.scope_id.as_deref()
    }

    /// Handle a viewer lifecycle notification.
    pub fn on_viewer_event(&mut self, event: ViewerEvent, stage: &mut dyn Stage) {
        match event {
            ViewerEvent::AfterInit => {
                if self.scope_id.is_some() {
                    debug!("binder: duplicate init ignored");
                    return;
                }
                let scope_id = new_scope_id();
                let css = build_css(&self.options, &scope_id);
                if let Err(e) = stage.inject_style(&css) {
                    // Unstyled ghosts would flash unscoped content; skip
                    // binding entirely and leave default navigation intact.
                    warn!("binder: style injection failed, not binding: {e:#}");
                    return;
                }
                stage.set_scope_tag(&scope_id);
                stage.intercept_controls();
                debug!("binder: bound with scope {scope_id}");
                self.scope_id = Some(scope_id);
            }
            ViewerEvent::Destroy => {
                if self.scope_id.is_none() {
                    return;
                }
                // A transition interrupted by destroy must not leave its
                // overlay behind.
                self.engine.cleanup(stage);
                stage.release_controls();
                stage.remove_scope_tag();
                stage.remove_style();
                self.scope_id = None;
                debug!("binder: unbound");
            }
        }
    }

    /// Forward an armed stage callback (frame, transition-end, timeout) to
    /// the engine.
    pub fn on_stage_event(&mut self, event: StageEvent, stage: &mut dyn Stage) {
        self.engine.on_stage_event(event, stage);
    }

    /// Handle an intercepted click on an arrow control.
    ///
    /// At a boundary with looping enabled this runs the ghost wrap;
    /// otherwise it performs the default single step itself. Either way the
    /// click is consumed — the adapter must prevent the host's own handler
    /// from also reacting.
    pub fn handle_click(
        &mut self,
        direction: NavigationDirection,
        viewer: &mut dyn HostViewer,
        stage: &mut dyn Stage,
        backend: &dyn ImageBackend,
    ) {
        if self.scope_id.is_none() {
            debug!("binder: click before init ignored");
            return;
        }
        let at_boundary = match direction {
            NavigationDirection::Prev => viewer.current_index() == 0,
            NavigationDirection::Next => {
                viewer.num_items() > 0 && viewer.current_index() == viewer.num_items() - 1
            }
        };
        if at_boundary && viewer.loop_enabled() {
            self.engine.request_wrap(direction, viewer, stage, backend);
        } else {
            let offset = match direction {
                NavigationDirection::Prev => -1,
                NavigationDirection::Next => 1,
            };
            viewer.move_by(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;
    use crate::host::{ItemData, NavigationDirection::{Next, Prev}};
    use crate::overlay::Overlay;
    use crate::plan::TrackOffset;
    use crate::preload::tests::{LoadScript, ScriptedBackend};
    use std::time::Duration;

    struct TestViewer {
        current: usize,
        count: usize,
        looping: bool,
        moves: Vec<isize>,
    }

    impl TestViewer {
        fn new(current: usize, count: usize, looping: bool) -> Self {
            Self { current, count, looping, moves: Vec::new() }
        }
    }

    impl HostViewer for TestViewer {
        fn current_index(&self) -> usize {
            self.current
        }
        fn num_items(&self) -> usize {
            self.count
        }
        fn loop_enabled(&self) -> bool {
            self.looping
        }
        fn item_data(&self, index: usize) -> Option<ItemData> {
            (index < self.count).then(|| ItemData {
                src: Some(format!("item-{index}.jpg")),
                ..Default::default()
            })
        }
        fn go_to(&mut self, index: usize) {
            self.current = index;
        }
        fn move_by(&mut self, offset: isize) {
            self.moves.push(offset);
            self.current = self.current.wrapping_add_signed(offset);
        }
    }

    #[derive(Default)]
    struct TestStage {
        style: Option<String>,
        scope_tag: Option<String>,
        controls_intercepted: bool,
        overlays: usize,
    }

    impl Stage for TestStage {
        fn insert_overlay(&mut self, _overlay: &Overlay, _at: TrackOffset) -> anyhow::Result<()> {
            self.overlays += 1;
            Ok(())
        }
        fn remove_overlay(&mut self) {
            self.overlays = self.overlays.saturating_sub(1);
        }
        fn force_layout(&mut self) {}
        fn animate_track_to(&mut self, _to: TrackOffset) -> anyhow::Result<()> {
            Ok(())
        }
        fn request_frame(&mut self) {}
        fn set_cleanup_timer(&mut self, _after: Duration) {}
        fn clear_cleanup_timer(&mut self) {}
        fn inject_style(&mut self, css: &str) -> anyhow::Result<()> {
            self.style = Some(css.to_string());
            Ok(())
        }
        fn remove_style(&mut self) {
            self.style = None;
        }
        fn set_scope_tag(&mut self, scope_id: &str) {
            self.scope_tag = Some(scope_id.to_string());
        }
        fn remove_scope_tag(&mut self) {
            self.scope_tag = None;
        }
        fn intercept_controls(&mut self) {
            self.controls_intercepted = true;
        }
        fn release_controls(&mut self) {
            self.controls_intercepted = false;
        }
    }

    fn backend() -> ScriptedBackend {
        ScriptedBackend::new(&[
            ("item-0.jpg", LoadScript::Decodes),
            ("item-1.jpg", LoadScript::Decodes),
            ("item-2.jpg", LoadScript::Decodes),
            ("item-3.jpg", LoadScript::Decodes),
            ("item-4.jpg", LoadScript::Decodes),
        ])
    }

    #[test]
    fn init_injects_scoped_style_and_intercepts() {
        let mut stage = TestStage::default();
        let mut binder = ArrowBinder::new(Options::default());

        binder.on_viewer_event(ViewerEvent::AfterInit, &mut stage);
        assert!(binder.is_bound());
        assert!(stage.controls_intercepted);
        let scope = stage.scope_tag.clone().expect("scope tag set");
        assert!(stage.style.as_deref().unwrap().contains(&scope));
    }

    #[test]
    fn destroy_undoes_everything() {
        let mut stage = TestStage::default();
        let mut binder = ArrowBinder::new(Options::default());

        binder.on_viewer_event(ViewerEvent::AfterInit, &mut stage);
        binder.on_viewer_event(ViewerEvent::Destroy, &mut stage);
        assert!(!binder.is_bound());
        assert!(stage.style.is_none());
        assert!(stage.scope_tag.is_none());
        assert!(!stage.controls_intercepted);
    }

    #[test]
    fn destroy_settles_an_in_flight_transition() {
        let mut viewer = TestViewer::new(4, 5, true);
        let mut stage = TestStage::default();
        let backend = backend();
        let mut binder = ArrowBinder::new(Options::default());

        binder.on_viewer_event(ViewerEvent::AfterInit, &mut stage);
        binder.handle_click(Next, &mut viewer, &mut stage, &backend);
        assert_eq!(stage.overlays, 1);

        binder.on_viewer_event(ViewerEvent::Destroy, &mut stage);
        assert_eq!(stage.overlays, 0, "destroy removes the leftover overlay");
        assert_eq!(binder.engine().phase(), Phase::Idle);
    }

    #[test]
    fn boundary_click_with_loop_runs_the_wrap() {
        let mut viewer = TestViewer::new(4, 5, true);
        let mut stage = TestStage::default();
        let backend = backend();
        let mut binder = ArrowBinder::new(Options::default());

        binder.on_viewer_event(ViewerEvent::AfterInit, &mut stage);
        binder.handle_click(Next, &mut viewer, &mut stage, &backend);
        assert!(binder.engine().is_busy());
        assert_eq!(viewer.current, 0);
        assert!(viewer.moves.is_empty(), "no default step on a wrap");
    }

    #[test]
    fn non_boundary_click_delegates_to_default_step() {
        let mut viewer = TestViewer::new(2, 5, true);
        let mut stage = TestStage::default();
        let backend = backend();
        let mut binder = ArrowBinder::new(Options::default());

        binder.on_viewer_event(ViewerEvent::AfterInit, &mut stage);
        binder.handle_click(Next, &mut viewer, &mut stage, &backend);
        assert_eq!(viewer.moves, vec![1]);
        assert_eq!(stage.overlays, 0, "no overlay or preload off the boundary");
        assert!(backend.opened.lock().unwrap().is_empty());

        binder.handle_click(Prev, &mut viewer, &mut stage, &backend);
        assert_eq!(viewer.moves, vec![1, -1]);
    }

    #[test]
    fn boundary_click_without_loop_steps_normally() {
        let mut viewer = TestViewer::new(4, 5, false);
        let mut stage = TestStage::default();
        let backend = backend();
        let mut binder = ArrowBinder::new(Options::default());

        binder.on_viewer_event(ViewerEvent::AfterInit, &mut stage);
        binder.handle_click(Next, &mut viewer, &mut stage, &backend);
        assert_eq!(viewer.moves, vec![1]);
        assert!(!binder.engine().is_busy());
    }

    #[test]
    fn clicks_before_init_are_ignored() {
        let mut viewer = TestViewer::new(0, 5, true);
        let mut stage = TestStage::default();
        let backend = backend();
        let mut binder = ArrowBinder::new(Options::default());

        binder.handle_click(Prev, &mut viewer, &mut stage, &backend);
        assert!(viewer.moves.is_empty());
        assert_eq!(stage.overlays, 0);
    }
}
