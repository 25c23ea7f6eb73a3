//! Transition driver — the ghost-wrap state machine.
//!
//! One engine instance serves one viewer. A wrap request runs:
//!
//!   Idle → Preloading → Positioned → Animating → Cleaning → Idle
//!
//! Preloading and positioning happen synchronously inside `request_wrap`
//! (the three image loads are joined before the overlay is built); the
//! Positioned→Animating and Animating→Cleaning edges are driven by
//! [`StageEvent`]s delivered through `on_stage_event`. A second request
//! while any phase other than Idle is active is dropped silently — the
//! phase field is the sole mutual-exclusion mechanism, so two overlays can
//! never coexist.
//!
//! Cleanup is reached from the transition-end signal, from the safety
//! timer, or from any error in any phase, and is idempotent: whichever
//! trigger arrives second finds the engine already Idle and does nothing.

use std::time::Duration;

use log::{debug, warn};

use crate::host::{HostViewer, NavigationDirection};
use crate::options::Options;
use crate::overlay::Overlay;
use crate::plan::TransitionPlan;
use crate::preload::{ImageBackend, preload_all};
use crate::resolve::resolve_source;
use crate::stage::{Stage, StageEvent};

/// Safety margin added to the animation duration before the cleanup timer
/// fires. The timer is armed during setup, so it also rescues a transition
/// whose frame callback or completion signal never arrives (interrupted
/// animations, tab backgrounding).
pub const CLEANUP_MARGIN: Duration = Duration::from_millis(250);

/// Where the engine is in the transition lifecycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// No transition in flight; the only phase that accepts a wrap request.
    Idle,
    /// The three slot sources are being resolved and loaded.
    Preloading,
    /// Overlay inserted at the start offset, index swapped, waiting for the
    /// animation frame.
    Positioned,
    /// The track is sliding; waiting for transition-end or the safety timer.
    Animating,
    /// Tearing down. Transient — observable only mid-cleanup.
    Cleaning,
}

/// The ghost-wrap transition engine for one viewer instance.
pub struct GhostWrap {
    options: Options,
    phase: Phase,
    plan: Option<TransitionPlan>,
    overlay: Option<Overlay>,
}

impl GhostWrap {
    pub fn new(options: Options) -> Self {
        Self { options, phase: Phase::Idle, plan: None, overlay: None }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a transition is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Run a boundary wrap in `direction`. On return the overlay is
    /// inserted, the index swapped, and both the frame callback and the
    /// safety timer are armed.
    ///
    /// Silent no-op while busy or when the viewer has fewer than two items.
    /// Never returns an error to the caller: any failure mid-setup is
    /// logged and routed to cleanup, leaving the engine idle again.
    pub fn request_wrap(
        &mut self,
        direction: NavigationDirection,
        viewer: &mut dyn HostViewer,
        stage: &mut dyn Stage,
        backend: &dyn ImageBackend,
    ) {
        if self.phase != Phase::Idle {
            debug!("engine: wrap request dropped, transition in flight (phase={:?})", self.phase);
            return;
        }
        let Some(plan) =
            TransitionPlan::compute(direction, viewer.current_index(), viewer.num_items())
        else {
            debug!("engine: wrap request ignored, fewer than two items");
            return;
        };
        debug!(
            "engine: wrap {direction:?} slots={:?} snap_to={} start={} end={}",
            plan.slots,
            plan.snap_to,
            plan.start.css(),
            plan.end.css(),
        );

        self.phase = Phase::Preloading;
        self.plan = Some(plan.clone());
        if let Err(e) = self.position(&plan, viewer, stage, backend) {
            warn!("engine: transition setup failed, cleaning up: {e:#}");
            self.cleanup(stage);
        }
    }

    /// Preload, build and insert the overlay, swap the index, arm the frame.
    fn position(
        &mut self,
        plan: &TransitionPlan,
        viewer: &mut dyn HostViewer,
        stage: &mut dyn Stage,
        backend: &dyn ImageBackend,
    ) -> anyhow::Result<()> {
        let sources = plan.slots.map(|index| resolve_source(&*viewer, index));
        let images = preload_all(backend, &sources);
        let overlay = Overlay::build(plan, images);
        if overlay.filled_slots() < 3 {
            debug!(
                "engine: {} of 3 slots empty, proceeding anyway",
                3 - overlay.filled_slots()
            );
        }

        // Insert first, swap second: the overlay must fully occlude the
        // viewer before the index jumps, or the jump is visible.
        stage.insert_overlay(&overlay, plan.start)?;
        self.overlay = Some(overlay);
        viewer.go_to(plan.snap_to);

        // Commit the start position before the animated move is requested,
        // or the platform may coalesce both into one frame.
        stage.force_layout();
        self.phase = Phase::Positioned;

        // Arm the safety timer before the frame is requested: a suspended
        // frame scheduler (backgrounded tab) must not strand the overlay.
        stage.set_cleanup_timer(self.options.animation_duration + CLEANUP_MARGIN);
        stage.request_frame();
        Ok(())
    }

    /// Feed an asynchronous stage completion into the state machine.
    pub fn on_stage_event(&mut self, event: StageEvent, stage: &mut dyn Stage) {
        match (self.phase, event) {
            (Phase::Positioned, StageEvent::Frame) => {
                let Some(end) = self.plan.as_ref().map(|p| p.end) else {
                    // Positioned without a plan is unreachable, but a stuck
                    // overlay would be worse than a skipped animation.
                    warn!("engine: positioned with no plan, cleaning up");
                    self.cleanup(stage);
                    return;
                };
                match stage.animate_track_to(end) {
                    Ok(()) => {
                        self.phase = Phase::Animating;
                        debug!("engine: animating track to {}", end.css());
                    }
                    Err(e) => {
                        warn!("engine: failed to start animation, cleaning up: {e:#}");
                        self.cleanup(stage);
                    }
                }
            }
            (Phase::Positioned, StageEvent::Timeout) => {
                debug!("engine: frame callback never fired, safety timer cleanup");
                self.cleanup(stage);
            }
            (Phase::Animating, StageEvent::TransitionEnd | StageEvent::Timeout) => {
                if event == StageEvent::Timeout {
                    debug!("engine: completion signal never fired, safety timer cleanup");
                }
                self.cleanup(stage);
            }
            // Stale signals from an already-settled transition.
            (Phase::Idle, _) => {}
            (phase, event) => debug!("engine: ignoring {event:?} in phase {phase:?}"),
        }
    }

    /// Tear down the in-flight transition and return to Idle.
    ///
    /// Idempotent: a second call (completion signal racing the safety
    /// timer, destroy racing either) finds the engine Idle and returns.
    pub fn cleanup(&mut self, stage: &mut dyn Stage) {
        if self.phase == Phase::Idle {
            return;
        }
        self.phase = Phase::Cleaning;
        stage.remove_overlay();
        stage.clear_cleanup_timer();
        // Dropping the overlay drops the slot images with it.
        self.overlay = None;
        self.plan = None;
        self.phase = Phase::Idle;
        debug!("engine: transition settled, idle");
    }
}
