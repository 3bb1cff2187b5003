//! Clarke-Wright savings.
//!
//! For a depot `0` and customers `i`, `j`:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! is the distance saved by serving `i` and `j` on one route instead of two
//! separate depot round-trips.

mod list;

pub use list::{SavingsEntry, SavingsList};
