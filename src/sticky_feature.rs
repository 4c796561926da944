use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::MotionEngine;
use crate::error::EngineError;
use crate::scroll_trigger::{ScrollTrigger, TriggerRegion};
use crate::stage::{ClipInset, Stage};
use crate::transitions::{Easing, ParamValue, Timeline, Transition, TweenProperty};

/// Virtual scroll length of the pinned section, in viewport heights.
pub const PIN_SPAN_VIEWPORTS: f32 = 3.0;

/// Segment-relative timing of the per-item records. One timeline unit is one
/// item segment; item `i` transitions inside `[i-1, i]`.
const TEXT_OUT_DURATION: f32 = 0.3;
const WRAPPER_IN_DELAY: f32 = 0.2;
const WRAPPER_IN_DURATION: f32 = 0.1;
const CHILDREN_DELAY: f32 = 0.3;
const CHILDREN_DURATION: f32 = 0.5;
const CHILDREN_STAGGER: f32 = 0.1;
const CHILDREN_Y_PERCENT: f32 = 30.0;

const HIDDEN_CLIP: ClipInset = ClipInset::from_top(100.0);

/// One feature item: a clip-revealed visual, a text wrapper that fades as a
/// whole, and text children that enter staggered.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StickyFeatureItem {
    pub visual: Uuid,
    pub wrapper: Uuid,
    pub text_children: Vec<Uuid>,
}

/// The pinned multi-stage feature section. Items are ordered; item 0 is the
/// rest state, each later item takes over one scroll segment.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StickyFeature {
    pub region: TriggerRegion,
    pub items: Vec<StickyFeatureItem>,
    pub progress_bar: Option<Uuid>,
}

impl StickyFeature {
    pub fn new(
        region: TriggerRegion,
        items: Vec<StickyFeatureItem>,
        progress_bar: Option<Uuid>,
    ) -> Result<Self, EngineError> {
        if items.is_empty() {
            return Err(EngineError::EmptyFeature);
        }
        Ok(Self {
            region,
            items,
            progress_bar,
        })
    }

    /// Convenience constructor that registers all elements on the stage:
    /// `item_count` items with `children_per_item` text children each, plus a
    /// progress bar.
    pub fn create(
        stage: &mut Stage,
        region: TriggerRegion,
        item_count: usize,
        children_per_item: usize,
    ) -> Result<Self, EngineError> {
        let items = (0..item_count)
            .map(|_| StickyFeatureItem {
                visual: stage.add_element(),
                wrapper: stage.add_element(),
                text_children: (0..children_per_item).map(|_| stage.add_element()).collect(),
            })
            .collect();
        let progress_bar = Some(stage.add_element());
        Self::new(region, items, progress_bar)
    }

    /// Establish the rest state: item 0 fully revealed, every other item
    /// hidden (visual clipped from the top, texts transparent and displaced),
    /// progress bar collapsed. Idempotent; safe to re-run on re-activation
    /// regardless of where a previous timeline left the stage.
    pub fn apply_rest_state(&self, stage: &mut Stage) {
        for (i, item) in self.items.iter().enumerate() {
            let first = i == 0;

            if let Some(visual) = stage.state_mut(item.visual) {
                visual.clip = if first { ClipInset::zero() } else { HIDDEN_CLIP };
            }
            if let Some(wrapper) = stage.state_mut(item.wrapper) {
                wrapper.opacity = if first { 1.0 } else { 0.0 };
            }
            for child in &item.text_children {
                if let Some(child) = stage.state_mut(*child) {
                    child.opacity = if first { 1.0 } else { 0.0 };
                    child.y_percent = if first { 0.0 } else { CHILDREN_Y_PERCENT };
                }
            }
        }

        if let Some(bar) = self.progress_bar {
            if let Some(bar) = stage.state_mut(bar) {
                bar.scale_x = 0.0;
            }
        }
    }

    /// Build the scrub timeline. `rest` must already hold the rest state so
    /// that `from` values round-trip: scrubbing to 0 reproduces it exactly.
    ///
    /// For each item i ≥ 1, anchored at segment start s = i-1:
    ///   1. visual clip reveal across [s, s+1], linear;
    ///   2. previous wrapper fades out over 0.3 from s;
    ///   3. current wrapper fades in over 0.1 from s+0.2, past the outgoing
    ///      fade's midpoint;
    ///   4. one staggered record for the text children from s+0.3.
    /// A single item produces only the progress-bar record.
    pub fn build_timeline(&self, rest: &Stage) -> Timeline {
        let item_count = self.items.len();
        let span = (item_count.saturating_sub(1)).max(1) as f32;
        let mut timeline = Timeline::new(span);

        for i in 1..item_count {
            let segment = (i - 1) as f32;
            let item = &self.items[i];
            let previous = &self.items[i - 1];

            let rest_clip = rest.state_or_default(item.visual).clip;
            timeline.add(Transition::new(
                &format!("visual-reveal-{i}"),
                vec![item.visual],
                vec![TweenProperty {
                    from: ParamValue::Clip(rest_clip),
                    to: ParamValue::Clip(ClipInset::zero()),
                }],
                segment,
                1.0,
                Easing::Linear,
            ));

            timeline.add(Transition::new(
                &format!("text-out-{}", i - 1),
                vec![previous.wrapper],
                vec![TweenProperty {
                    // The previous wrapper is always fully visible when its
                    // segment begins, whatever its rest opacity was.
                    from: ParamValue::Opacity(1.0),
                    to: ParamValue::Opacity(0.0),
                }],
                segment,
                TEXT_OUT_DURATION,
                Easing::EaseInOut,
            ));

            let rest_wrapper = rest.state_or_default(item.wrapper).opacity;
            timeline.add(Transition::new(
                &format!("wrapper-in-{i}"),
                vec![item.wrapper],
                vec![TweenProperty {
                    from: ParamValue::Opacity(rest_wrapper),
                    to: ParamValue::Opacity(1.0),
                }],
                segment + WRAPPER_IN_DELAY,
                WRAPPER_IN_DURATION,
                Easing::EaseInOut,
            ));

            if !item.text_children.is_empty() {
                timeline.add(
                    Transition::new(
                        &format!("text-children-{i}"),
                        item.text_children.clone(),
                        vec![
                            TweenProperty {
                                from: ParamValue::YPercent(CHILDREN_Y_PERCENT),
                                to: ParamValue::YPercent(0.0),
                            },
                            TweenProperty {
                                from: ParamValue::Opacity(0.0),
                                to: ParamValue::Opacity(1.0),
                            },
                        ],
                        segment + CHILDREN_DELAY,
                        CHILDREN_DURATION,
                        Easing::EaseOut,
                    )
                    .with_stagger(CHILDREN_STAGGER),
                );
            }
        }

        if let Some(bar) = self.progress_bar {
            timeline.add(Transition::new(
                "progress-bar",
                vec![bar],
                vec![TweenProperty {
                    from: ParamValue::ScaleX(0.0),
                    to: ParamValue::ScaleX(1.0),
                }],
                0.0,
                span,
                Easing::Linear,
            ));
        }

        timeline
    }

    /// Set the rest state and bind the timeline to the pinned region's scroll
    /// span (3 viewport heights). Returns the binding id for teardown.
    pub fn install(&self, engine: &mut MotionEngine) -> Uuid {
        self.apply_rest_state(&mut engine.stage);
        let timeline = self.build_timeline(&engine.stage);
        let span = PIN_SPAN_VIEWPORTS * engine.viewport().height;
        let trigger = ScrollTrigger::pinned(self.region, span);
        engine.add_timeline(trigger, timeline)
    }
}
