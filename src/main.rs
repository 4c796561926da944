use scrollmotion_engine::activation::{ActivationHandle, MediaCondition, ResponsiveGate};
use scrollmotion_engine::engine::MotionEngine;
use scrollmotion_engine::scroll::Viewport;
use scrollmotion_engine::scroll_trigger::TriggerRegion;
use scrollmotion_engine::sticky_feature::StickyFeature;

fn main() {
    let viewport = Viewport::new(1280.0, 800.0);
    let mut engine = MotionEngine::new(viewport, 20_000.0);

    let feature = StickyFeature::create(
        &mut engine.stage,
        TriggerRegion::new(0.0, viewport.height),
        3,
        2,
    )
    .expect("demo feature has items");

    let mut gate = ResponsiveGate::new();
    {
        let feature = feature.clone();
        gate.add(MediaCondition::ALWAYS, move |engine| {
            let mut handle = ActivationHandle::new();
            handle.track(feature.install(engine));
            handle
        });
    }
    gate.evaluate(&mut engine, viewport);

    // Simulate a slow scroll through the pinned section.
    engine.scroll.scroll_by(3.0 * viewport.height);
    for frame in 0..600 {
        engine.tick(1.0 / 60.0);
        if frame % 120 == 0 {
            let bar = feature.progress_bar.expect("demo has a bar");
            println!(
                "scroll {:7.1}px  progress bar {:.2}",
                engine.scroll.position(),
                engine.stage.state_or_default(bar).scale_x
            );
        }
    }

    for (i, item) in feature.items.iter().enumerate() {
        let wrapper = engine.stage.state_or_default(item.wrapper);
        let visual = engine.stage.state_or_default(item.visual);
        println!(
            "item {i}: wrapper opacity {:.2}, clip top {:.1}%",
            wrapper.opacity, visual.clip.top
        );
    }

    gate.teardown(&mut engine);
}
