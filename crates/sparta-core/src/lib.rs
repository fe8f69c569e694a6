//! Sparta Core
//!
//! This crate contains the shared foundation of the Sparta widget toolkit:
//! integer geometry, colors, the generational arena used for the widget tree,
//! configuration, logging and profiling hooks.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;

pub use color::Rgba;
pub use config::Config;
pub use geometry::{Point, Rect};
