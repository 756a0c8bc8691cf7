//! Step definitions for drag-and-drop move scenarios.

mod given;
mod then;
mod when;
pub mod world;
