//! Distance matrices.
//!
//! Provides the dense matrix backing [`CvrpInstance`](crate::models::CvrpInstance).

mod matrix;

pub use matrix::DistanceMatrix;
