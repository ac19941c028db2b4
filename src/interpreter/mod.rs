pub mod app;
pub mod config;
pub mod cpu;
pub mod error;
pub mod instruction;
pub mod palette;
pub mod state;
