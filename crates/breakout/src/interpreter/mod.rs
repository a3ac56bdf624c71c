//! Template interpreter.
//!
//! This module provides the execution side: the mutable [`Document`], the
//! layered [`Context`], dot-path resolution, the [`Engine`] that walks a
//! token tree, and the block handlers it dispatches to.

mod blocks;
mod context;
mod document;
mod engine;
mod error;
mod renderer;
mod resolver;

pub use blocks::{BlockHandler, ForBlock, IfBlock, RawBlock, handler_for};
pub use context::Context;
pub use document::Document;
pub use engine::Engine;
pub use error::{LoadError, RenderError, compute_suggestions};
pub use renderer::{Renderer, Template};
pub use resolver::{Lookup, resolve};
