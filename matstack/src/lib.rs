//! Matstack - Legacy-GL transform matrix stack
//!
//! Fixed-capacity stack of 4x4 transform matrices for hierarchical
//! coordinate-space traversal, with the semantics of the legacy OpenGL
//! matrix stack (`glPushMatrix`/`glPopMatrix`/`glTranslate`/`glScale`/
//! `glRotate`).
//!
//! Key properties:
//! - Preallocated contiguous matrix arena (no allocation on push/pop)
//! - In-place closed-form composition operators via glam
//! - Deterministic overflow/underflow failure at a caller-chosen bound

pub mod error;
pub mod stack;

pub use error::*;
pub use stack::*;

pub fn version() -> &'static str {
    "0.1.0"
}
