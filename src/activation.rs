use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::MotionEngine;
use crate::scroll::Viewport;

/// A layout-condition predicate over the viewport, the matchMedia analog.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct MediaCondition {
    pub min_width: f32,
    pub max_width: Option<f32>,
}

impl MediaCondition {
    /// "(min-width: 0px)": matches every viewport.
    pub const ALWAYS: MediaCondition = MediaCondition {
        min_width: 0.0,
        max_width: None,
    };

    pub fn matches(&self, viewport: &Viewport) -> bool {
        viewport.width >= self.min_width
            && self.max_width.map_or(true, |max| viewport.width <= max)
    }
}

/// Everything one activation registered on the engine. Consumed on release,
/// so a handle can only be torn down once.
#[derive(Debug, Default)]
pub struct ActivationHandle {
    bindings: Vec<Uuid>,
}

impl ActivationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, binding: Uuid) {
        self.bindings.push(binding);
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    fn release(self, engine: &mut MotionEngine) {
        for binding in self.bindings {
            engine.remove_binding(binding);
        }
    }
}

type SetupFn = Box<dyn FnMut(&mut MotionEngine) -> ActivationHandle>;

struct Registration {
    condition: MediaCondition,
    setup: SetupFn,
    active: Option<ActivationHandle>,
}

/// Re-runs condition-gated setup on viewport changes. Every inactive→active
/// edge runs the setup closure and keeps its handle; every active→inactive
/// edge releases that handle's bindings before anything else can activate, so
/// duplicate scroll handlers cannot accumulate across rebuilds.
#[derive(Default)]
pub struct ResponsiveGate {
    registrations: Vec<Registration>,
}

impl ResponsiveGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, condition: MediaCondition, setup: F)
    where
        F: FnMut(&mut MotionEngine) -> ActivationHandle + 'static,
    {
        self.registrations.push(Registration {
            condition,
            setup: Box::new(setup),
            active: None,
        });
    }

    pub fn active_count(&self) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.active.is_some())
            .count()
    }

    /// Evaluate all conditions against the viewport, tearing down and setting
    /// up as needed. Call on every resize (and once after registration).
    pub fn evaluate(&mut self, engine: &mut MotionEngine, viewport: Viewport) {
        engine.set_viewport(viewport);

        for registration in &mut self.registrations {
            let matched = registration.condition.matches(&viewport);
            match (matched, registration.active.take()) {
                (true, None) => {
                    tracing::debug!(condition = ?registration.condition, "condition activated");
                    registration.active = Some((registration.setup)(engine));
                }
                (true, Some(handle)) => {
                    registration.active = Some(handle);
                }
                (false, Some(handle)) => {
                    tracing::debug!(condition = ?registration.condition, "condition deactivated");
                    handle.release(engine);
                }
                (false, None) => {}
            }
        }
    }

    /// Release every active registration, e.g. on page teardown.
    pub fn teardown(&mut self, engine: &mut MotionEngine) {
        for registration in &mut self.registrations {
            if let Some(handle) = registration.active.take() {
                handle.release(engine);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_trigger::{ScrollTrigger, TriggerRegion};
    use crate::transitions::Timeline;

    fn engine() -> MotionEngine {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        MotionEngine::new(Viewport::new(1280.0, 800.0), 20_000.0)
    }

    fn install_timeline(engine: &mut MotionEngine) -> ActivationHandle {
        let trigger = ScrollTrigger::pinned(TriggerRegion::new(0.0, 800.0), 2400.0);
        let mut handle = ActivationHandle::new();
        handle.track(engine.add_timeline(trigger, Timeline::new(1.0)));
        handle
    }

    #[test]
    fn condition_matching() {
        let desktop = MediaCondition {
            min_width: 768.0,
            max_width: None,
        };
        assert!(desktop.matches(&Viewport::new(1280.0, 800.0)));
        assert!(!desktop.matches(&Viewport::new(480.0, 800.0)));
        assert!(MediaCondition::ALWAYS.matches(&Viewport::new(1.0, 1.0)));
    }

    #[test]
    fn activation_runs_setup_once_per_edge() {
        let mut engine = engine();
        let mut gate = ResponsiveGate::new();
        gate.add(
            MediaCondition {
                min_width: 768.0,
                max_width: None,
            },
            install_timeline,
        );

        let wide = Viewport::new(1280.0, 800.0);
        gate.evaluate(&mut engine, wide);
        assert_eq!(engine.binding_count(), 1);

        // Re-evaluating while still matched must not stack a second setup.
        gate.evaluate(&mut engine, wide);
        assert_eq!(engine.binding_count(), 1);
        assert_eq!(gate.active_count(), 1);
    }

    #[test]
    fn deactivation_releases_bindings() {
        let mut engine = engine();
        let mut gate = ResponsiveGate::new();
        gate.add(
            MediaCondition {
                min_width: 768.0,
                max_width: None,
            },
            install_timeline,
        );

        gate.evaluate(&mut engine, Viewport::new(1280.0, 800.0));
        assert_eq!(engine.binding_count(), 1);

        gate.evaluate(&mut engine, Viewport::new(480.0, 800.0));
        assert_eq!(engine.binding_count(), 0);
        assert_eq!(gate.active_count(), 0);

        // Crossing back re-runs setup against a clean engine.
        gate.evaluate(&mut engine, Viewport::new(1280.0, 800.0));
        assert_eq!(engine.binding_count(), 1);
    }

    #[test]
    fn teardown_releases_everything() {
        let mut engine = engine();
        let mut gate = ResponsiveGate::new();
        gate.add(MediaCondition::ALWAYS, install_timeline);
        gate.evaluate(&mut engine, Viewport::new(1280.0, 800.0));
        assert_eq!(engine.binding_count(), 1);

        gate.teardown(&mut engine);
        assert_eq!(engine.binding_count(), 0);
        assert_eq!(gate.active_count(), 0);
    }
}
