use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use uuid::Uuid;

use crate::error::EngineError;
use crate::stage::{ClipInset, ElementState, Stage};

/// Types of easing functions available for interpolation
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Display, EnumIter)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Cubic falloff, used by the entrance reveals
    CubicOut,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// One animatable parameter with its value. A tween pairs two of the same
/// kind; the variant decides which `ElementState` field gets written.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug, Display)]
pub enum ParamValue {
    Opacity(f32),
    X(f32),
    Y(f32),
    XPercent(f32),
    YPercent(f32),
    Scale(f32),
    ScaleX(f32),
    Rotation(f32),
    Clip(ClipInset),
    OverlayOpacity(f32),
}

impl ParamValue {
    pub fn same_kind(&self, other: &ParamValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn write(&self, state: &mut ElementState) {
        match *self {
            ParamValue::Opacity(v) => state.opacity = v,
            ParamValue::X(v) => state.x = v,
            ParamValue::Y(v) => state.y = v,
            ParamValue::XPercent(v) => state.x_percent = v,
            ParamValue::YPercent(v) => state.y_percent = v,
            ParamValue::Scale(v) => state.scale = v,
            ParamValue::ScaleX(v) => state.scale_x = v,
            ParamValue::Rotation(v) => state.rotation = v,
            ParamValue::Clip(v) => state.clip = v,
            ParamValue::OverlayOpacity(v) => state.overlay_opacity = v,
        }
    }
}

fn lerp(start: f32, end: f32, progress: f32) -> f32 {
    start + (end - start) * progress
}

/// A from/to pair for a single parameter. Kind equality is checked at
/// construction so sampling never has to fail.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct TweenProperty {
    pub from: ParamValue,
    pub to: ParamValue,
}

impl TweenProperty {
    pub fn new(from: ParamValue, to: ParamValue) -> Result<Self, EngineError> {
        if !from.same_kind(&to) {
            return Err(EngineError::PropertyMismatch {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    /// Interpolated value at eased progress. A mismatched pair (only possible
    /// by constructing the struct literally) degrades to the target value.
    pub fn sample(&self, progress: f32) -> ParamValue {
        match (self.from, self.to) {
            (ParamValue::Opacity(a), ParamValue::Opacity(b)) => {
                ParamValue::Opacity(lerp(a, b, progress))
            }
            (ParamValue::X(a), ParamValue::X(b)) => ParamValue::X(lerp(a, b, progress)),
            (ParamValue::Y(a), ParamValue::Y(b)) => ParamValue::Y(lerp(a, b, progress)),
            (ParamValue::XPercent(a), ParamValue::XPercent(b)) => {
                ParamValue::XPercent(lerp(a, b, progress))
            }
            (ParamValue::YPercent(a), ParamValue::YPercent(b)) => {
                ParamValue::YPercent(lerp(a, b, progress))
            }
            (ParamValue::Scale(a), ParamValue::Scale(b)) => ParamValue::Scale(lerp(a, b, progress)),
            (ParamValue::ScaleX(a), ParamValue::ScaleX(b)) => {
                ParamValue::ScaleX(lerp(a, b, progress))
            }
            (ParamValue::Rotation(a), ParamValue::Rotation(b)) => {
                ParamValue::Rotation(lerp(a, b, progress))
            }
            (ParamValue::Clip(a), ParamValue::Clip(b)) => {
                ParamValue::Clip(ClipInset::lerp(&a, &b, progress))
            }
            (ParamValue::OverlayOpacity(a), ParamValue::OverlayOpacity(b)) => {
                ParamValue::OverlayOpacity(lerp(a, b, progress))
            }
            _ => self.to,
        }
    }
}

/// One timed transition record on a timeline: which elements, which property
/// pairs, where on the position axis it lives, and how it eases. A record with
/// several targets staggers each successive target's start by `stagger`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Transition {
    pub id: String,
    pub targets: Vec<Uuid>,
    pub properties: Vec<TweenProperty>,
    /// Start offset in timeline position units
    pub start: f32,
    pub duration: f32,
    pub stagger: f32,
    pub easing: Easing,
}

impl Transition {
    pub fn new(
        label: &str,
        targets: Vec<Uuid>,
        properties: Vec<TweenProperty>,
        start: f32,
        duration: f32,
        easing: Easing,
    ) -> Self {
        Self {
            id: label.to_string(),
            targets,
            properties,
            start,
            duration,
            stagger: 0.0,
            easing,
        }
    }

    pub fn with_stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger;
        self
    }

    /// Position at which the last staggered target finishes.
    pub fn end(&self) -> f32 {
        let staggered = self.stagger * self.targets.len().saturating_sub(1) as f32;
        self.start + self.duration + staggered
    }

    /// Start offset of target `k`, accounting for stagger.
    pub fn target_start(&self, k: usize) -> f32 {
        self.start + self.stagger * k as f32
    }
}

/// An ordered sequence of transition records replayed against a scrub head.
/// Construction is pure data; nothing renders until `scrub` is called, and
/// scrubbing never mutates the records.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Timeline {
    pub id: Uuid,
    pub transitions: Vec<Transition>,
    /// Minimum scrubbable length in position units; the real duration is the
    /// max of this and the latest record end.
    pub span: f32,
}

impl Timeline {
    pub fn new(span: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            transitions: Vec::new(),
            span: span.max(f32::EPSILON),
        }
    }

    pub fn add(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn duration(&self) -> f32 {
        self.transitions
            .iter()
            .map(Transition::end)
            .fold(self.span, f32::max)
    }

    /// Evaluate every record against a single progress value in [0,1].
    ///
    /// The head is a pure read head: the rendered state depends only on
    /// `progress`, never on where the head was before, so backward jumps of
    /// any size land exactly (scrubbing back to 0 reproduces the `from`
    /// layer).
    ///
    /// Two passes make that hold for records sharing a parameter. Records the
    /// head has not reached render their `from` values first, in reverse
    /// insertion order, so the earliest upcoming record supplies the value a
    /// parameter holds before anything touches it. Started records then apply
    /// in insertion order at their clamped local time; the latest write wins,
    /// which is the tie-break contract for simultaneous writes.
    pub fn scrub(&self, stage: &mut Stage, progress: f32) {
        let position = progress.clamp(0.0, 1.0) * self.duration();

        for transition in self.transitions.iter().rev() {
            for (k, target) in transition.targets.iter().enumerate() {
                if position >= transition.target_start(k) {
                    continue;
                }
                render(transition, *target, 0.0, stage);
            }
        }

        for transition in &self.transitions {
            for (k, target) in transition.targets.iter().enumerate() {
                let local_start = transition.target_start(k);
                if position < local_start {
                    continue;
                }

                let t = if transition.duration <= f32::EPSILON {
                    1.0
                } else {
                    ((position - local_start) / transition.duration).min(1.0)
                };
                render(transition, *target, t, stage);
            }
        }
    }
}

fn render(transition: &Transition, target: Uuid, t: f32, stage: &mut Stage) {
    let eased = transition.easing.apply(t);
    let Some(state) = stage.state_mut(target) else {
        return;
    };
    for property in &transition.properties {
        property.sample(eased).write(state);
    }
}
