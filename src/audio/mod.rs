pub mod effects;
pub mod narration;
pub mod player;
pub mod queue;
