//! Monthly payroll engine for field technicians.
//!
//! This crate turns daily check-in/check-out records into a monthly
//! attendance summary and net salary. Thursday is the weekly holiday and is
//! paid only when the technician was present on the Tuesday before and the
//! Friday after it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
