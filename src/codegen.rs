//! Template-to-Pillow compiler.
//!
//! [`generate`] walks a [`ProjectModel`](crate::ProjectModel) snapshot and emits one Python
//! module: imports, a function that rebuilds the composition, and an example `__main__` block.
//! The pass is read-only and deterministic; identical models produce byte-identical text.

pub mod emitter;
pub mod literal;
pub mod options;
pub mod params;
pub mod paths;
pub mod writer;

pub use emitter::{GeneratedCode, generate};
pub use options::{EmitOptions, Finish};
pub use params::{ParamSpec, ParamType, collect_parameters};
