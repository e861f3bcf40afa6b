pub mod fast_multiply;
pub mod play;
