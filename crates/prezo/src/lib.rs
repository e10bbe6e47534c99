//! Prezo drives a slide presentation inside a web page.
//!
//! Slides are plain elements inside a stage container. Prezo tags each one
//! `past`, `present` or `future` relative to the current slide, keeps the stage
//! centered and scaled to the window, and mirrors the current slide in the
//! address fragment (`#/3`) so any slide can be linked to.
//!
//! The core is host independent and talks to the page through [`Surface`].
//! On `wasm32` the `web` module provides the DOM implementation and starts
//! itself when the module is loaded.

pub mod config;
pub mod deck;
pub mod fragment;
pub mod input;
pub mod layout;
pub mod presentation;
pub mod surface;
pub mod task;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::Config;
pub use deck::{Deck, Direction, SlideState, clamp_index};
pub use layout::{StageGeometry, StageLayout, TransformStyle, Viewport, compute_layout};
pub use presentation::{Navigation, Presentation};
pub use surface::Surface;
