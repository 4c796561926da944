pub mod activation;
pub mod cursor_preview;
pub mod engine;
pub mod error;
pub mod marquee;
pub mod modal;
pub mod parallax;
pub mod saved_state;
pub mod scroll;
pub mod scroll_trigger;
pub mod stage;
pub mod sticky_cards;
pub mod sticky_feature;
pub mod text_reveal;
pub mod transitions;
