use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::MotionEngine;
use crate::scroll_trigger::{ScrollTrigger, TriggerRegion};
use crate::transitions::{Easing, ParamValue, Timeline, Transition, TweenProperty};

/// The footer's inner content starts displaced upward by this much.
pub const INNER_Y_PERCENT: f32 = -25.0;
/// The darkening layer starts half opaque and clears as the footer arrives.
pub const DARK_FROM_OPACITY: f32 = 0.5;

/// Footer parallax: while the footer region travels from the viewport bottom
/// to the top, the inner content eases from a -25% offset to rest and the
/// dark layer from half opacity to full. Either hook may be absent.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct FooterParallax {
    pub region: TriggerRegion,
    pub inner: Option<Uuid>,
    pub dark: Option<Uuid>,
}

impl FooterParallax {
    pub fn new(region: TriggerRegion, inner: Option<Uuid>, dark: Option<Uuid>) -> Self {
        Self {
            region,
            inner,
            dark,
        }
    }

    /// No-ops entirely when neither hook exists, per the missing-element
    /// policy.
    pub fn install(&self, engine: &mut MotionEngine) -> Option<Uuid> {
        if self.inner.is_none() && self.dark.is_none() {
            return None;
        }

        let mut timeline = Timeline::new(1.0);
        if let Some(inner) = self.inner {
            timeline.add(Transition::new(
                "footer-inner",
                vec![inner],
                vec![TweenProperty {
                    from: ParamValue::YPercent(INNER_Y_PERCENT),
                    to: ParamValue::YPercent(0.0),
                }],
                0.0,
                1.0,
                Easing::Linear,
            ));
        }
        if let Some(dark) = self.dark {
            timeline.add(Transition::new(
                "footer-dark",
                vec![dark],
                vec![TweenProperty {
                    from: ParamValue::Opacity(DARK_FROM_OPACITY),
                    to: ParamValue::Opacity(1.0),
                }],
                0.0,
                1.0,
                Easing::Linear,
            ));
        }

        let trigger = ScrollTrigger::approach(self.region);
        Some(engine.add_timeline(trigger, timeline))
    }
}
