// ABOUTME: Permission module - policy rules, approval handlers, and the gate
// ABOUTME: that puts a human in the loop before sensitive tool calls.

mod gate;
mod handler;
mod policy;

pub use gate::*;
pub use handler::*;
pub use policy::*;
