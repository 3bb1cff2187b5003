//! # u-savings
//!
//! Capacitated vehicle routing with savings-based construction: the
//! Clarke-Wright greedy merge and a binary Monte Carlo look-ahead built on
//! the same merge machinery.
//!
//! ## Modules
//!
//! - [`models`] — Problem data trait, customers, nodes, routes, solutions
//! - [`distance`] — Dense distance matrix
//! - [`savings`] — Ordered Clarke-Wright savings list
//! - [`constructive`] — Greedy Clarke-Wright solver
//! - [`mcs`] — Binary Monte Carlo savings solver
//! - [`solver`] — Solver trait and wall-clock deadline

pub mod constructive;
pub mod distance;
pub mod mcs;
pub mod models;
pub mod savings;
pub mod solver;
