pub mod activity;
pub mod normalize;
pub mod sector;
