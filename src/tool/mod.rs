// ABOUTME: Tool module - defines tools, the function adapter, toolsets,
// ABOUTME: argument validation, callbacks, the registry, and result shaping.

mod callback;
mod function;
mod registry;
mod result;
mod schema;
mod toolset;
mod traits;
pub mod validation;

pub use callback::*;
pub use function::*;
pub use registry::*;
pub use result::*;
pub use schema::*;
pub use toolset::*;
pub use traits::*;

#[cfg(test)]
mod function_test;
