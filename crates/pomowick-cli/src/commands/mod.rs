pub mod menu;
pub mod settings;
pub mod start;
pub mod stats;
