use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Edge insets in percent, masking an element's visible area.
/// `zero()` means fully revealed.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ClipInset {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl ClipInset {
    pub const fn zero() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    /// Clip fully from the top edge, the rest state of hidden visuals.
    pub const fn from_top(percent: f32) -> Self {
        Self {
            top: percent,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    pub fn lerp(from: &ClipInset, to: &ClipInset, progress: f32) -> ClipInset {
        ClipInset {
            top: from.top + (to.top - from.top) * progress,
            right: from.right + (to.right - from.right) * progress,
            bottom: from.bottom + (to.bottom - from.bottom) * progress,
            left: from.left + (to.left - from.left) * progress,
        }
    }
}

/// The animatable parameters of one element. Interpolation executors write
/// these; nothing here knows how a renderer would consume them.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct ElementState {
    pub opacity: f32,
    /// Pixel offsets (pointer follower, text reveals)
    pub x: f32,
    pub y: f32,
    /// Percent offsets relative to the element's own size
    pub x_percent: f32,
    pub y_percent: f32,
    pub scale: f32,
    pub scale_x: f32,
    /// Degrees
    pub rotation: f32,
    pub clip: ClipInset,
    /// Darkening layer on top of the element
    pub overlay_opacity: f32,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            x_percent: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            scale_x: 1.0,
            rotation: 0.0,
            clip: ClipInset::zero(),
            overlay_opacity: 0.0,
        }
    }
}

/// Registry of every element the engine animates, keyed by id. Stands in for
/// the document: features register their elements here and bindings mutate
/// the states per tick.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct Stage {
    elements: HashMap<Uuid, ElementState>,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    pub fn add_element(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.elements.insert(id, ElementState::default());
        id
    }

    pub fn add_element_with(&mut self, state: ElementState) -> Uuid {
        let id = Uuid::new_v4();
        self.elements.insert(id, state);
        id
    }

    pub fn remove(&mut self, id: Uuid) -> Option<ElementState> {
        self.elements.remove(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn state(&self, id: Uuid) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    pub fn state_mut(&mut self, id: Uuid) -> Option<&mut ElementState> {
        self.elements.get_mut(&id)
    }

    /// Rest-state lookup used by timeline builders; an unknown id degrades to
    /// the default state rather than failing the build.
    pub fn state_or_default(&self, id: Uuid) -> ElementState {
        self.elements.get(&id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
