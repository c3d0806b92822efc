//! Browser adapters
//!
//! Everything that touches the DOM lives here so the simulation, HUD logic and
//! renderer stay testable natively.

#[cfg(target_arch = "wasm32")]
pub mod dom;
