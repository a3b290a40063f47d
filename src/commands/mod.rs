//! CLI commands for revsim

pub mod dispatch;
pub mod duplicates;
pub mod helpers;
pub mod products;
pub mod recommend;
pub mod render;
pub mod repl;
pub mod score;
pub mod stats;
