//! Gantt chart with draggable dependency arrows.
//!
//! The [`links`] module is toolkit independent: it computes arrow paths and
//! runs the arrow controllers against a small set of host traits. The [`ui`]
//! module implements those traits on top of egui.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod links;
pub mod model;
pub mod ui;

pub use error::{Error, Result};
