//! Simulation engine for a vertical space shooter.
//!
//! The engine owns no I/O: a driver holds a [`entities::GameSession`], feeds
//! it [`phase::Intent`]s, calls [`compute::tick`] once per frame, and reads
//! a [`snapshot::Snapshot`] to draw.

pub mod catalog;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod firing;
pub mod phase;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod timers;
