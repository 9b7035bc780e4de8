//! Generator of parity miter benchmarks for SAT solvers.
//!
//! Two XOR trees over the same shared inputs are reduced in independently
//! randomized orders, Tseitin encoded and joined by a distinctness
//! constraint. The resulting CNF is unsatisfiable and is written in DIMACS
//! format.

pub mod config;
mod encode;
pub mod error;
pub mod generate;
pub mod instance;
pub mod literal;
mod pool;
pub mod rng;
mod schedule;

pub use config::{Config, Order};
pub use error::{Error, Result};
pub use generate::{build, generate};
pub use instance::Instance;
