//! Domain model types for capacitated vehicle routing.
//!
//! Problem data is read-only and shared; each [`Solution`] owns its own
//! [`Node`] arena and [`Route`]s, so allocation state never leaks between
//! solutions or into the problem definition.

mod customer;
mod instance;
mod node;
mod problem;
mod route;
mod solution;

pub use customer::Customer;
pub use instance::CvrpInstance;
pub use node::{Node, NodeArena};
pub use problem::CvrpData;
pub use route::Route;
pub use solution::{RouteSummary, Solution, SolutionSummary};
