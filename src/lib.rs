//! Typewar - type the words on the map to march your units

pub mod campaign;
pub mod core;
pub mod interaction;
pub mod simulation;
pub mod ui;
pub mod words;
