use cgmath::Vector2;
use uuid::Uuid;

use crate::stage::Stage;
use crate::transitions::Easing;

/// Per-second smoothing rate of the follower toward the pointer.
pub const FOLLOW_RATE: f32 = 8.0;
/// Seconds for a visual swap in or out.
pub const SWAP_DURATION: f32 = 0.5;
/// Percent a swapped visual travels from / toward.
pub const SWAP_OFFSET: f32 = 100.0;

struct OutgoingVisual {
    visual: Uuid,
    t: f32,
    to_percent: f32,
}

struct IncomingVisual {
    visual: Uuid,
    t: f32,
    from_percent: f32,
}

/// A preview card that trails the pointer over a list of location items.
/// Hovering item k slides the previous visual out and the new one in, upward
/// when moving forward through the list, downward when moving back. The very
/// first entry after a leave snaps into place without animation.
pub struct CursorPreview {
    pub follower: Uuid,
    position: Vector2<f32>,
    target: Vector2<f32>,
    prev_index: Option<usize>,
    first_entry: bool,
    active: Option<Uuid>,
    incoming: Option<IncomingVisual>,
    outgoing: Vec<OutgoingVisual>,
    /// Outgoing visuals are dropped from the stage when their exit finishes.
    leave_countdown: Option<f32>,
}

impl CursorPreview {
    pub fn new(follower: Uuid) -> Self {
        Self {
            follower,
            position: Vector2::new(0.0, 0.0),
            target: Vector2::new(0.0, 0.0),
            prev_index: None,
            first_entry: true,
            active: None,
            incoming: None,
            outgoing: Vec::new(),
            leave_countdown: None,
        }
    }

    pub fn active_visual(&self) -> Option<Uuid> {
        self.active
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.target = Vector2::new(x, y);
    }

    /// Hover entered list item `index`, whose preview visual is a fresh stage
    /// element owned by this preview from now on.
    pub fn enter_item(&mut self, index: usize, visual: Uuid, stage: &mut Stage) {
        let forward = self.prev_index.map_or(true, |prev| index > prev);
        self.prev_index = Some(index);
        self.leave_countdown = None;

        // Current visual (and any half-finished incoming one) starts exiting.
        let exit_to = if forward { -SWAP_OFFSET } else { SWAP_OFFSET };
        if let Some(previous) = self.active.take() {
            self.outgoing.push(OutgoingVisual {
                visual: previous,
                t: 0.0,
                to_percent: exit_to,
            });
        }
        self.incoming = None;

        self.active = Some(visual);
        if self.first_entry {
            self.first_entry = false;
            if let Some(state) = stage.state_mut(visual) {
                state.y_percent = 0.0;
            }
        } else {
            let from = if forward { SWAP_OFFSET } else { -SWAP_OFFSET };
            if let Some(state) = stage.state_mut(visual) {
                state.y_percent = from;
            }
            self.incoming = Some(IncomingVisual {
                visual,
                t: 0.0,
                from_percent: from,
            });
        }
    }

    /// Pointer left the collection; the current visual is dropped after the
    /// swap duration and the next entry snaps again.
    pub fn leave(&mut self) {
        self.prev_index = None;
        self.first_entry = true;
        self.leave_countdown = Some(SWAP_DURATION);
    }

    /// Advance smoothing and swap animations by `dt` seconds.
    pub fn tick(&mut self, dt: f32, stage: &mut Stage) {
        let blend = 1.0 - (-FOLLOW_RATE * dt.max(0.0)).exp();
        self.position += (self.target - self.position) * blend;
        if let Some(state) = stage.state_mut(self.follower) {
            state.x = self.position.x;
            state.y = self.position.y;
        }

        if let Some(incoming) = &mut self.incoming {
            incoming.t = (incoming.t + dt / SWAP_DURATION).min(1.0);
            let eased = Easing::EaseInOut.apply(incoming.t);
            if let Some(state) = stage.state_mut(incoming.visual) {
                state.y_percent = incoming.from_percent * (1.0 - eased);
            }
            if incoming.t >= 1.0 {
                self.incoming = None;
            }
        }

        for outgoing in &mut self.outgoing {
            outgoing.t = (outgoing.t + dt / SWAP_DURATION).min(1.0);
            let eased = Easing::EaseInOut.apply(outgoing.t);
            if let Some(state) = stage.state_mut(outgoing.visual) {
                state.y_percent = outgoing.to_percent * eased;
            }
        }
        for finished in self.outgoing.iter().filter(|o| o.t >= 1.0) {
            stage.remove(finished.visual);
        }
        self.outgoing.retain(|o| o.t < 1.0);

        if let Some(countdown) = &mut self.leave_countdown {
            *countdown -= dt;
            if *countdown <= 0.0 {
                self.leave_countdown = None;
                if let Some(active) = self.active.take() {
                    stage.remove(active);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(preview: &mut CursorPreview, stage: &mut Stage, seconds: f32) {
        let steps = (seconds * 60.0).ceil() as usize;
        for _ in 0..steps {
            preview.tick(1.0 / 60.0, stage);
        }
    }

    #[test]
    fn follower_converges_on_pointer() {
        let mut stage = Stage::new();
        let follower = stage.add_element();
        let mut preview = CursorPreview::new(follower);

        preview.pointer_moved(640.0, 360.0);
        run(&mut preview, &mut stage, 3.0);

        let state = stage.state_or_default(follower);
        assert!((state.x - 640.0).abs() < 1.0);
        assert!((state.y - 360.0).abs() < 1.0);
    }

    #[test]
    fn first_entry_snaps_without_animation() {
        let mut stage = Stage::new();
        let follower = stage.add_element();
        let visual = stage.add_element_with({
            let mut s = crate::stage::ElementState::default();
            s.y_percent = SWAP_OFFSET;
            s
        });

        let mut preview = CursorPreview::new(follower);
        preview.enter_item(0, visual, &mut stage);
        assert_eq!(stage.state(visual).map(|s| s.y_percent), Some(0.0));
    }

    #[test]
    fn forward_hover_slides_old_visual_up_and_drops_it() {
        let mut stage = Stage::new();
        let follower = stage.add_element();
        let first = stage.add_element();
        let second = stage.add_element();

        let mut preview = CursorPreview::new(follower);
        preview.enter_item(0, first, &mut stage);
        preview.enter_item(2, second, &mut stage);

        // Forward: incoming starts below, outgoing heads upward.
        assert_eq!(stage.state(second).map(|s| s.y_percent), Some(SWAP_OFFSET));
        run(&mut preview, &mut stage, 0.25);
        let old = stage.state_or_default(first);
        assert!(old.y_percent < 0.0);

        run(&mut preview, &mut stage, 0.5);
        assert!(!stage.contains(first), "finished exit removes the visual");
        assert_eq!(stage.state(second).map(|s| s.y_percent), Some(0.0));
        assert_eq!(preview.active_visual(), Some(second));
    }

    #[test]
    fn backward_hover_reverses_direction() {
        let mut stage = Stage::new();
        let follower = stage.add_element();
        let first = stage.add_element();
        let second = stage.add_element();

        let mut preview = CursorPreview::new(follower);
        preview.enter_item(3, first, &mut stage);
        preview.enter_item(1, second, &mut stage);

        assert_eq!(
            stage.state(second).map(|s| s.y_percent),
            Some(-SWAP_OFFSET)
        );
        run(&mut preview, &mut stage, 0.25);
        assert!(stage.state_or_default(first).y_percent > 0.0);
    }

    #[test]
    fn leave_drops_active_after_delay_and_resets_entry() {
        let mut stage = Stage::new();
        let follower = stage.add_element();
        let first = stage.add_element();

        let mut preview = CursorPreview::new(follower);
        preview.enter_item(0, first, &mut stage);
        preview.leave();
        run(&mut preview, &mut stage, 1.0);
        assert!(!stage.contains(first));

        // Next hover snaps again.
        let next = stage.add_element_with({
            let mut s = crate::stage::ElementState::default();
            s.y_percent = SWAP_OFFSET;
            s
        });
        preview.enter_item(2, next, &mut stage);
        assert_eq!(stage.state(next).map(|s| s.y_percent), Some(0.0));
    }
}
