//! Canvas 2D rendering module
//!
//! Geometry lives in `shapes` (plain math, usable anywhere); `canvas` pushes
//! it to the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
