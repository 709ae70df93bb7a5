//! Credit evaluation engine.
//!
//! An applicant record flows through the eligibility gate, the weighted risk scorer, and the
//! offer calculator, all parameterized by a [`credit::RuleSet`] snapshot. The `config`,
//! `error`, and `telemetry` modules carry the process-level plumbing used by the operator CLI.

pub mod config;
pub mod credit;
pub mod error;
pub mod telemetry;
