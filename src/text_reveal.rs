use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::MotionEngine;
use crate::scroll_trigger::{ScrollTrigger, TriggerAnchor, TriggerEnd, TriggerRegion};
use crate::transitions::{Easing, ParamValue, Transition, TweenProperty};

/// Starting pixel offset below the rest position.
pub const Y_FROM: f32 = 50.0;
/// Play duration in seconds.
pub const DURATION_SECS: f32 = 1.0;
/// Viewport line the element must cross, as a fraction of the height.
pub const VIEWPORT_LINE: f32 = 0.85;

/// A one-shot entrance for a text block: rise from 50px / fade from 0 once
/// its top crosses 85% of the viewport, reversing if scrolled back above.
/// Elements inside a sticky feature are excluded by the caller since the
/// feature timeline owns them.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct TextReveal {
    pub element: Uuid,
    pub region: TriggerRegion,
}

impl TextReveal {
    pub fn new(element: Uuid, region: TriggerRegion) -> Self {
        Self { element, region }
    }

    pub fn install(&self, engine: &mut MotionEngine) -> Uuid {
        let trigger = ScrollTrigger {
            region: self.region,
            start: TriggerAnchor::top_at(VIEWPORT_LINE),
            end: TriggerEnd::Span(0.0),
            pin: false,
        };

        let transition = Transition::new(
            "text-reveal",
            vec![self.element],
            vec![
                TweenProperty {
                    from: ParamValue::Y(Y_FROM),
                    to: ParamValue::Y(0.0),
                },
                TweenProperty {
                    from: ParamValue::Opacity(0.0),
                    to: ParamValue::Opacity(1.0),
                },
            ],
            0.0,
            1.0,
            Easing::CubicOut,
        );
        engine.add_toggle(trigger, transition, DURATION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::Viewport;

    fn settle(engine: &mut MotionEngine) {
        for _ in 0..600 {
            engine.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn plays_on_crossing_and_reverses_above() {
        let mut engine = MotionEngine::new(Viewport::new(1280.0, 800.0), 20_000.0);
        let element = engine.stage.add_element();
        if let Some(state) = engine.stage.state_mut(element) {
            state.opacity = 0.0;
            state.y = Y_FROM;
        }
        // Crossing line: 2000 - 0.85 * 800 = 1320.
        TextReveal::new(element, TriggerRegion::new(2000.0, 120.0)).install(&mut engine);

        engine.scroll.scroll_by(1000.0);
        settle(&mut engine);
        let before = engine.stage.state_or_default(element);
        assert_eq!(before.opacity, 0.0);
        assert_eq!(before.y, Y_FROM);

        engine.scroll.scroll_by(500.0);
        settle(&mut engine);
        let after = engine.stage.state_or_default(element);
        assert_eq!(after.opacity, 1.0);
        assert_eq!(after.y, 0.0);

        engine.scroll.scroll_by(-500.0);
        settle(&mut engine);
        let reversed = engine.stage.state_or_default(element);
        assert_eq!(reversed.opacity, 0.0);
        assert_eq!(reversed.y, Y_FROM);
    }
}
