use uuid::Uuid;

use crate::scroll::{ScrollController, Viewport};
use crate::scroll_trigger::ScrollTrigger;
use crate::stage::Stage;
use crate::transitions::{Timeline, Transition};

type ScrubFn = Box<dyn FnMut(&mut Stage, f32)>;

/// How a binding turns a tick into parameter writes.
enum Playback {
    /// Pre-built timeline scrubbed by trigger progress.
    Timeline(Timeline),
    /// Callback invoked with trigger progress, for bindings whose mapping is
    /// cheaper to express directly than as records.
    Scrub(ScrubFn),
    /// Wall-clock transition repeating forever (marquees).
    Repeat { transition: Transition, period: f32 },
    /// Plays forward once the trigger start is crossed, reverses when it is
    /// crossed back. `playhead` is in seconds.
    Toggle {
        transition: Transition,
        duration: f32,
        playhead: f32,
    },
}

struct Binding {
    id: Uuid,
    trigger: Option<ScrollTrigger>,
    playback: Playback,
}

/// Owns the stage, the smooth-scroll controller and every registered binding,
/// and advances them all from one tick source. Within a tick the scroll
/// position is read exactly once; every binding is evaluated against that one
/// value, in registration order.
pub struct MotionEngine {
    pub stage: Stage,
    pub scroll: ScrollController,
    viewport: Viewport,
    bindings: Vec<Binding>,
    clock: f32,
}

impl MotionEngine {
    pub fn new(viewport: Viewport, scroll_limit: f32) -> Self {
        Self {
            stage: Stage::new(),
            scroll: ScrollController::new(scroll_limit),
            viewport,
            bindings: Vec::new(),
            clock: 0.0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Live timelines, oldest first. Exposed so lifecycle tests can assert
    /// exactly one timeline survives a rebuild.
    pub fn timelines(&self) -> impl Iterator<Item = &Timeline> {
        self.bindings.iter().filter_map(|b| match &b.playback {
            Playback::Timeline(tl) => Some(tl),
            _ => None,
        })
    }

    pub fn add_timeline(&mut self, trigger: ScrollTrigger, timeline: Timeline) -> Uuid {
        tracing::debug!(records = timeline.transitions.len(), "timeline bound");
        self.push_binding(Some(trigger), Playback::Timeline(timeline))
    }

    pub fn add_scrub<F>(&mut self, trigger: ScrollTrigger, update: F) -> Uuid
    where
        F: FnMut(&mut Stage, f32) + 'static,
    {
        self.push_binding(Some(trigger), Playback::Scrub(Box::new(update)))
    }

    pub fn add_repeat(&mut self, transition: Transition, period: f32) -> Uuid {
        self.push_binding(
            None,
            Playback::Repeat {
                transition,
                period: period.max(f32::EPSILON),
            },
        )
    }

    pub fn add_toggle(
        &mut self,
        trigger: ScrollTrigger,
        transition: Transition,
        duration: f32,
    ) -> Uuid {
        self.push_binding(
            Some(trigger),
            Playback::Toggle {
                transition,
                duration: duration.max(f32::EPSILON),
                playhead: 0.0,
            },
        )
    }

    fn push_binding(&mut self, trigger: Option<ScrollTrigger>, playback: Playback) -> Uuid {
        let id = Uuid::new_v4();
        self.bindings.push(Binding {
            id,
            trigger,
            playback,
        });
        id
    }

    pub fn remove_binding(&mut self, id: Uuid) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.id != id);
        let removed = self.bindings.len() != before;
        if removed {
            tracing::debug!(%id, "binding removed");
        }
        removed
    }

    /// One cooperative tick: settle the smooth scroll, then replay every
    /// binding against the settled position.
    pub fn tick(&mut self, dt: f32) {
        self.clock += dt;
        let position = self.scroll.raf(dt);

        for binding in &mut self.bindings {
            match &mut binding.playback {
                Playback::Timeline(timeline) => {
                    let Some(trigger) = &binding.trigger else {
                        continue;
                    };
                    let progress = trigger.progress(position, &self.viewport);
                    timeline.scrub(&mut self.stage, progress);
                }
                Playback::Scrub(update) => {
                    let Some(trigger) = &binding.trigger else {
                        continue;
                    };
                    let progress = trigger.progress(position, &self.viewport);
                    update(&mut self.stage, progress);
                }
                Playback::Repeat { transition, period } => {
                    let cycle = (self.clock / *period).fract();
                    apply_at(transition, cycle, &mut self.stage);
                }
                Playback::Toggle {
                    transition,
                    duration,
                    playhead,
                } => {
                    let Some(trigger) = &binding.trigger else {
                        continue;
                    };
                    let step = if trigger.passed(position, &self.viewport) {
                        dt
                    } else {
                        -dt
                    };
                    *playhead = (*playhead + step).clamp(0.0, *duration);
                    apply_at(transition, *playhead / *duration, &mut self.stage);
                }
            }
        }
    }
}

/// Write a transition's properties to all its targets at eased progress `t`,
/// ignoring the record's own start/duration placement.
fn apply_at(transition: &Transition, t: f32, stage: &mut Stage) {
    let eased = transition.easing.apply(t.clamp(0.0, 1.0));
    for target in &transition.targets {
        let Some(state) = stage.state_mut(*target) else {
            continue;
        };
        for property in &transition.properties {
            property.sample(eased).write(state);
        }
    }
}
