//! Transition planning — pure index/offset arithmetic.
//!
//! The ghost track holds three slots at 300% width, so one slot is a third
//! of the track. Placing the track at -1/3 centers slot B over the viewport,
//! which makes the overlay's initial rendered position pixel-identical to
//! the real viewer before any motion starts.

use crate::host::NavigationDirection;

/// Horizontal track position, in thirds of the track width.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrackOffset {
    /// 0% — slot A over the viewport.
    None,
    /// -33.3333% — slot B over the viewport.
    OneSlot,
    /// -66.6666% — slot C over the viewport.
    TwoSlots,
}

impl TrackOffset {
    /// CSS translateX percentage for this offset.
    pub fn css(self) -> &'static str {
        match self {
            TrackOffset::None => "0%",
            TrackOffset::OneSlot => "-33.3333%",
            TrackOffset::TwoSlots => "-66.6666%",
        }
    }

    /// Numeric fraction of the track width (0, -1/3, -2/3).
    pub fn fraction(self) -> f64 {
        match self {
            TrackOffset::None => 0.0,
            TrackOffset::OneSlot => -1.0 / 3.0,
            TrackOffset::TwoSlots => -2.0 / 3.0,
        }
    }
}

/// Everything one wrap transition needs, computed up front and immutable
/// for the transition's lifetime.
#[derive(Clone, Debug)]
pub struct TransitionPlan {
    /// Item indices for slots A, B, C in display order. Slot B is always the
    /// item visible when the transition starts.
    pub slots: [usize; 3],
    /// Track position before the animation.
    pub start: TrackOffset,
    /// Track position the animation slides to.
    pub end: TrackOffset,
    /// Index the real viewer jumps to while the overlay masks it.
    pub snap_to: usize,
}

impl TransitionPlan {
    /// Plan a wrap in `direction` from `current` out of `num_items` items.
    ///
    /// Returns `None` when `num_items < 2`: wrapping to the same single item
    /// is meaningless and the request is a no-op.
    pub fn compute(
        direction: NavigationDirection,
        current: usize,
        num_items: usize,
    ) -> Option<TransitionPlan> {
        if num_items < 2 {
            return None;
        }
        let before = (num_items + current - 1) % num_items;
        match direction {
            // last → first: [before, current, first], slide B → C.
            NavigationDirection::Next => Some(TransitionPlan {
                slots: [before, current, 0],
                start: TrackOffset::OneSlot,
                end: TrackOffset::TwoSlots,
                snap_to: 0,
            }),
            // first → last: [before, current, after], slide B → A.
            NavigationDirection::Prev => {
                let after = (current + 1) % num_items;
                Some(TransitionPlan {
                    slots: [before, current, after],
                    start: TrackOffset::OneSlot,
                    end: TrackOffset::None,
                    snap_to: before,
                })
            }
        }
    }
}
