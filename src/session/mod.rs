pub mod player;
pub mod sink;
