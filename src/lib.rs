//! Attendance, leave and payroll rule engine for employee management.
//!
//! This crate classifies attendance, recommends and decides leave, derives
//! monthly salaries from approved attendance and summarizes payslips. Rules
//! are pure functions over records loaded by the caller; an optional HTTP
//! boundary exposes them as JSON endpoints.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
