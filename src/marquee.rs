use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uuid::Uuid;

use crate::engine::MotionEngine;
use crate::transitions::{Easing, ParamValue, Transition, TweenProperty};

/// Seconds for one full wrap of the track.
pub const PERIOD_SECS: f32 = 20.0;
/// The track content is laid out three times, so moving one third of the
/// total width lands back on an identical frame.
pub const SHIFT_PERCENT: f32 = 100.0 / 3.0;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Display)]
pub enum MarqueeDirection {
    Left,
    Right,
}

/// An infinitely looping partner row. The wrap is seamless because start and
/// end frames are one content-set apart.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct MarqueeRow {
    pub track: Uuid,
    pub direction: MarqueeDirection,
}

impl MarqueeRow {
    pub fn new(track: Uuid, direction: MarqueeDirection) -> Self {
        Self { track, direction }
    }

    pub fn install(&self, engine: &mut MotionEngine) -> Uuid {
        let (from, to) = match self.direction {
            MarqueeDirection::Left => (0.0, -SHIFT_PERCENT),
            MarqueeDirection::Right => (-SHIFT_PERCENT, 0.0),
        };

        let transition = Transition::new(
            "marquee",
            vec![self.track],
            vec![TweenProperty {
                from: ParamValue::XPercent(from),
                to: ParamValue::XPercent(to),
            }],
            0.0,
            1.0,
            Easing::Linear,
        );
        engine.add_repeat(transition, PERIOD_SECS)
    }
}
