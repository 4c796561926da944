use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::marquee::MarqueeDirection;
use crate::scroll::Viewport;
use crate::scroll_trigger::TriggerRegion;

/// Declarative description of one page's motion setup, enough to rebuild the
/// whole scene: which features exist and where their regions sit. Element ids
/// are not persisted; they are minted when the scene is instantiated.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SavedSceneConfig {
    pub id: String,
    pub viewport: Viewport,
    pub scroll_limit: f32,
    pub sticky_feature: Option<SavedStickyFeatureConfig>,
    pub card_regions: Vec<TriggerRegion>,
    pub marquees: Vec<SavedMarqueeConfig>,
    pub footer_region: Option<TriggerRegion>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SavedStickyFeatureConfig {
    pub region: TriggerRegion,
    pub item_count: usize,
    pub children_per_item: usize,
}

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct SavedMarqueeConfig {
    pub direction: MarqueeDirection,
}

impl SavedSceneConfig {
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let config = SavedSceneConfig {
            id: "landing".to_string(),
            viewport: Viewport::new(1280.0, 800.0),
            scroll_limit: 20_000.0,
            sticky_feature: Some(SavedStickyFeatureConfig {
                region: TriggerRegion::new(0.0, 800.0),
                item_count: 3,
                children_per_item: 2,
            }),
            card_regions: vec![
                TriggerRegion::new(3200.0, 800.0),
                TriggerRegion::new(4000.0, 800.0),
            ],
            marquees: vec![
                SavedMarqueeConfig {
                    direction: MarqueeDirection::Left,
                },
                SavedMarqueeConfig {
                    direction: MarqueeDirection::Right,
                },
            ],
            footer_region: Some(TriggerRegion::new(18_000.0, 900.0)),
        };

        let json = config.to_json().expect("serialize");
        let back = SavedSceneConfig::from_json(&json).expect("deserialize");
        assert_eq!(config, back);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            SavedSceneConfig::from_json("{not json"),
            Err(EngineError::Serde(_))
        ));
    }
}
