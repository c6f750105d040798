// ABOUTME: Example tools - weather, time, sentiment, orders, preferences, capitals,
// ABOUTME: document analysis, calculator, support transfer, reimbursement, MCP-backed sets.

mod calculator;
mod capital;
mod doc_analysis;
mod filesystem;
mod maps;
mod order;
mod preference;
mod reimbursement;
mod sentiment;
mod support;
mod time;
mod weather;

pub use calculator::*;
pub use capital::*;
pub use doc_analysis::*;
pub use filesystem::*;
pub use maps::*;
pub use order::*;
pub use preference::*;
pub use reimbursement::*;
pub use sentiment::*;
pub use support::*;
pub use time::*;
pub use weather::*;
