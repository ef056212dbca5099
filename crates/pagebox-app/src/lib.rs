//! PageBox Application
//!
//! The browser shell: binds the core page model to the DOM, wires pointer
//! and drag-and-drop events, and exposes the builder actions to the page.

mod builder;
mod markup;

pub use builder::{Builder, Outcome, PointerTarget, UiAction};
pub use markup::{classes, ids};

#[cfg(target_arch = "wasm32")]
mod elements;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
