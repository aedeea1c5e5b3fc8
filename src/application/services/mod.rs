//! Application services

pub mod estimator;

pub use estimator::{read_inputs, EstimatorBinding, FieldEvent};
