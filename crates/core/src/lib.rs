//! # Cabinet Core
//!
//! Domain types and the slot planning logic of the Cabinet office backend.
//! This crate does no I/O of its own: storage is reached through the traits
//! in [`gateway`].

pub mod commands;
pub mod context;
pub mod errors;
pub mod gateway;
pub mod inbox;
pub mod models;
pub mod planner;
pub mod schedule;
