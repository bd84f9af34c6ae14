//! Rendering layer: format-specific shapes for numbered equations and references.

pub mod equation;
pub mod format;

pub use equation::{render_equation, render_reference};
pub use format::OutputFormat;
