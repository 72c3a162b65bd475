pub mod activity;
pub mod breathe;
pub mod config;
pub mod goal;
pub mod gratitude;
pub mod mood;
pub mod plan;
pub mod profile;
pub mod stats;
