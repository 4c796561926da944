use serde::{Deserialize, Serialize};

use crate::scroll::Viewport;

/// Document-space extent of a trigger element.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct TriggerRegion {
    pub top: f32,
    pub height: f32,
}

impl TriggerRegion {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// A point where the region meets the viewport: `region_fraction` picks a spot
/// along the region (0 = top edge, 1 = bottom edge) and `viewport_fraction`
/// the viewport line it crosses (0 = top, 1 = bottom, 0.85 = "85%").
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct TriggerAnchor {
    pub region_fraction: f32,
    pub viewport_fraction: f32,
}

impl TriggerAnchor {
    /// "top top": region top reaches the viewport top.
    pub const TOP_TOP: TriggerAnchor = TriggerAnchor {
        region_fraction: 0.0,
        viewport_fraction: 0.0,
    };

    /// "top bottom": region top enters at the viewport bottom.
    pub const TOP_BOTTOM: TriggerAnchor = TriggerAnchor {
        region_fraction: 0.0,
        viewport_fraction: 1.0,
    };

    pub const fn top_at(viewport_fraction: f32) -> Self {
        Self {
            region_fraction: 0.0,
            viewport_fraction,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub enum TriggerEnd {
    Anchor(TriggerAnchor),
    /// Fixed virtual scroll length past the start, the pinned-region case.
    Span(f32),
}

/// Maps the virtualized scroll position onto a [0,1] progress scalar for one
/// region. Pinning itself is a layout concern; `pin` only records that the
/// region holds still while the span is consumed.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct ScrollTrigger {
    pub region: TriggerRegion,
    pub start: TriggerAnchor,
    pub end: TriggerEnd,
    pub pin: bool,
}

impl ScrollTrigger {
    /// Pin the region at the viewport top and scrub across `span` pixels of
    /// virtual scroll.
    pub fn pinned(region: TriggerRegion, span: f32) -> Self {
        Self {
            region,
            start: TriggerAnchor::TOP_TOP,
            end: TriggerEnd::Span(span),
            pin: true,
        }
    }

    /// Scrub while the region travels from entering at the viewport bottom to
    /// reaching the viewport top.
    pub fn approach(region: TriggerRegion) -> Self {
        Self {
            region,
            start: TriggerAnchor::TOP_BOTTOM,
            end: TriggerEnd::Anchor(TriggerAnchor::TOP_TOP),
            pin: false,
        }
    }

    fn anchor_position(&self, anchor: &TriggerAnchor, viewport: &Viewport) -> f32 {
        self.region.top + self.region.height * anchor.region_fraction
            - viewport.height * anchor.viewport_fraction
    }

    pub fn start_position(&self, viewport: &Viewport) -> f32 {
        self.anchor_position(&self.start, viewport)
    }

    pub fn end_position(&self, viewport: &Viewport) -> f32 {
        match self.end {
            TriggerEnd::Anchor(anchor) => self.anchor_position(&anchor, viewport),
            TriggerEnd::Span(span) => self.start_position(viewport) + span,
        }
    }

    /// Progress in [0,1]. A degenerate range snaps to 0/1 around the start.
    pub fn progress(&self, scroll: f32, viewport: &Viewport) -> f32 {
        let start = self.start_position(viewport);
        let end = self.end_position(viewport);
        if end <= start {
            return if scroll >= start { 1.0 } else { 0.0 };
        }
        ((scroll - start) / (end - start)).clamp(0.0, 1.0)
    }

    /// Whether the start rule has been crossed, for toggle-style playback.
    pub fn passed(&self, scroll: f32, viewport: &Viewport) -> bool {
        scroll >= self.start_position(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn pinned_trigger_spans_virtual_length() {
        let trigger = ScrollTrigger::pinned(TriggerRegion::new(2000.0, 800.0), 2400.0);
        assert_eq!(trigger.progress(1999.0, &VIEWPORT), 0.0);
        assert_eq!(trigger.progress(2000.0, &VIEWPORT), 0.0);
        assert!((trigger.progress(3200.0, &VIEWPORT) - 0.5).abs() < 1e-6);
        assert_eq!(trigger.progress(4400.0, &VIEWPORT), 1.0);
        assert_eq!(trigger.progress(9000.0, &VIEWPORT), 1.0);
    }

    #[test]
    fn approach_trigger_runs_bottom_to_top() {
        let region = TriggerRegion::new(3000.0, 800.0);
        let trigger = ScrollTrigger::approach(region);
        // Region top enters the viewport bottom at 3000 - 800 = 2200.
        assert_eq!(trigger.start_position(&VIEWPORT), 2200.0);
        assert_eq!(trigger.end_position(&VIEWPORT), 3000.0);
        assert!((trigger.progress(2600.0, &VIEWPORT) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fractional_viewport_anchor() {
        let region = TriggerRegion::new(1000.0, 100.0);
        let trigger = ScrollTrigger {
            region,
            start: TriggerAnchor::top_at(0.85),
            end: TriggerEnd::Span(1.0),
            pin: false,
        };
        // top 85%: fires once scroll reaches 1000 - 0.85 * 800 = 320.
        assert!(!trigger.passed(319.0, &VIEWPORT));
        assert!(trigger.passed(320.0, &VIEWPORT));
    }

    #[test]
    fn degenerate_range_snaps() {
        let region = TriggerRegion::new(500.0, 0.0);
        let trigger = ScrollTrigger {
            region,
            start: TriggerAnchor::TOP_TOP,
            end: TriggerEnd::Span(0.0),
            pin: false,
        };
        assert_eq!(trigger.progress(499.0, &VIEWPORT), 0.0);
        assert_eq!(trigger.progress(500.0, &VIEWPORT), 1.0);
    }
}
