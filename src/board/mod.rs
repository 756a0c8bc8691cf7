//! Kanban board with drag-and-drop task ordering.
//!
//! Tasks live in columns and are ordered by a floating-point position. A move
//! computes a position between the drop target's neighbours so that only the
//! moved task is written; when that leaves a fractional or colliding value
//! the destination column is rewritten to consecutive integers in the same
//! atomic write. The module
//! follows hexagonal architecture:
//!
//! - Domain types and the reorder engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and client actions in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
