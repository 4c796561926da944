use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::MotionEngine;
use crate::scroll_trigger::{ScrollTrigger, TriggerRegion};
use crate::transitions::{Easing, ParamValue, Timeline, Transition, TweenProperty};

/// How much a card shrinks while the next one covers it.
pub const SCALE_DROP: f32 = 0.25;
/// Alternating tilt applied to the outgoing card, in degrees.
pub const TILT_DEGREES: f32 = 5.0;

/// A stack of full-height cards pinned by the layout; as the next card slides
/// in from the bottom, the current one scales down, tilts (alternating
/// direction per index) and darkens.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StickyCardDeck {
    pub cards: Vec<Uuid>,
    pub regions: Vec<TriggerRegion>,
}

impl StickyCardDeck {
    pub fn new(cards: Vec<Uuid>, regions: Vec<TriggerRegion>) -> Self {
        Self { cards, regions }
    }

    /// One scrub timeline per card except the last, driven by the next card's
    /// approach (its top travelling from the viewport bottom to the top).
    pub fn install(&self, engine: &mut MotionEngine) -> Vec<Uuid> {
        let count = self.cards.len().min(self.regions.len());
        let mut bindings = Vec::new();

        for index in 0..count.saturating_sub(1) {
            let tilt = if index % 2 == 0 {
                TILT_DEGREES
            } else {
                -TILT_DEGREES
            };

            let mut timeline = Timeline::new(1.0);
            timeline.add(Transition::new(
                &format!("card-out-{index}"),
                vec![self.cards[index]],
                vec![
                    TweenProperty {
                        from: ParamValue::Scale(1.0),
                        to: ParamValue::Scale(1.0 - SCALE_DROP),
                    },
                    TweenProperty {
                        from: ParamValue::Rotation(0.0),
                        to: ParamValue::Rotation(tilt),
                    },
                    TweenProperty {
                        from: ParamValue::OverlayOpacity(0.0),
                        to: ParamValue::OverlayOpacity(1.0),
                    },
                ],
                0.0,
                1.0,
                Easing::Linear,
            ));

            let trigger = ScrollTrigger::approach(self.regions[index + 1]);
            bindings.push(engine.add_timeline(trigger, timeline));
        }

        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::Viewport;

    fn deck(engine: &mut MotionEngine, count: usize) -> StickyCardDeck {
        let height = engine.viewport().height;
        let cards = (0..count).map(|_| engine.stage.add_element()).collect();
        let regions = (0..count)
            .map(|i| TriggerRegion::new(i as f32 * height, height))
            .collect();
        StickyCardDeck::new(cards, regions)
    }

    fn settle(engine: &mut MotionEngine) {
        for _ in 0..600 {
            engine.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn last_card_gets_no_binding() {
        let mut engine = MotionEngine::new(Viewport::new(1280.0, 800.0), 20_000.0);
        let deck = deck(&mut engine, 4);
        let bindings = deck.install(&mut engine);
        assert_eq!(bindings.len(), 3);
        assert_eq!(engine.binding_count(), 3);
    }

    #[test]
    fn card_shrinks_tilts_and_darkens_as_next_approaches() {
        let mut engine = MotionEngine::new(Viewport::new(1280.0, 800.0), 20_000.0);
        let deck = deck(&mut engine, 3);
        deck.install(&mut engine);

        // Card 1's region starts at 800; halfway through its approach the
        // scroll sits at (800 - 800) + 400 = 400.
        engine.scroll.scroll_by(400.0);
        settle(&mut engine);

        let card0 = engine.stage.state_or_default(deck.cards[0]);
        assert!((card0.scale - 0.875).abs() < 1e-3);
        assert!((card0.rotation - 2.5).abs() < 1e-3);
        assert!((card0.overlay_opacity - 0.5).abs() < 1e-3);

        // Even/odd cards tilt opposite ways.
        engine.scroll.scroll_by(800.0);
        settle(&mut engine);
        let card0 = engine.stage.state_or_default(deck.cards[0]);
        let card1 = engine.stage.state_or_default(deck.cards[1]);
        assert!((card0.rotation - TILT_DEGREES).abs() < 1e-3);
        assert!((card1.rotation + TILT_DEGREES * 0.5).abs() < 1e-2);
    }
}
