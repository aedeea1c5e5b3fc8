//! floorcalc: itemized price estimates for vinyl flooring installation
//!
//! Layers:
//! - `domain`: price table, inputs, rules and formatting (pure)
//! - `application`: rendering and the estimator binding
//! - `infrastructure`: input/output surfaces, interactive session, DI
//! - `config`: layered settings
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
