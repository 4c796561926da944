use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-second exponential smoothing rate for the virtualized position.
pub const DEFAULT_SMOOTHING: f32 = 10.0;

/// Below this distance the position snaps onto the target.
const SETTLE_EPSILON: f32 = 0.01;

type ScrollListener = Box<dyn FnMut(f32)>;

/// Virtualized smooth-scroll engine. Raw input moves a target; `raf` eases
/// the published position toward it each tick and notifies subscribers.
/// `stop`/`start` gate raw input without dropping subscriptions, so a modal
/// can freeze the page while scrub bindings stay registered.
pub struct ScrollController {
    position: f32,
    target: f32,
    limit: f32,
    smoothing: f32,
    stopped: bool,
    subscribers: Vec<(Uuid, ScrollListener)>,
}

impl ScrollController {
    /// Starts at the top regardless of any previously persisted position.
    pub fn new(limit: f32) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            limit: limit.max(0.0),
            smoothing: DEFAULT_SMOOTHING,
            stopped: false,
            subscribers: Vec::new(),
        }
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.max(0.0);
        self
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Raw wheel/touch input. Ignored while stopped.
    pub fn scroll_by(&mut self, delta: f32) {
        if self.stopped {
            return;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
    }

    /// Jump the target without animation history (initial load, anchors).
    pub fn scroll_to(&mut self, position: f32) {
        if self.stopped {
            return;
        }
        self.target = position.clamp(0.0, self.limit);
    }

    pub fn stop(&mut self) {
        if !self.stopped {
            tracing::debug!("scroll controller stopped");
            self.stopped = true;
        }
    }

    pub fn start(&mut self) {
        if self.stopped {
            tracing::debug!("scroll controller resumed");
            self.stopped = false;
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Uuid
    where
        F: FnMut(f32) + 'static,
    {
        let id = Uuid::new_v4();
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: Uuid) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Advance the smoothed position by `dt` seconds and publish it. Returns
    /// the settled value so the caller can evaluate all bindings against the
    /// same reading.
    pub fn raf(&mut self, dt: f32) -> f32 {
        let blend = 1.0 - (-self.smoothing * dt.max(0.0)).exp();
        self.position += (self.target - self.position) * blend;
        if (self.target - self.position).abs() < SETTLE_EPSILON {
            self.position = self.target;
        }

        let position = self.position;
        for (_, listener) in &mut self.subscribers {
            listener(position);
        }
        position
    }
}
