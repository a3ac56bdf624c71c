//! CLI command implementations.

mod check;
mod render;
mod tokens;

pub use check::{CheckArgs, run_check};
pub use render::{RenderArgs, run_render};
pub use tokens::{TokensArgs, run_tokens};
