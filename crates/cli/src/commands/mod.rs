//! CLI commands for cross-market arbitrage.

pub mod demo;
pub mod evaluate;

pub use demo::{run_demo, DemoArgs};
pub use evaluate::{run_evaluate, EvaluateArgs};
