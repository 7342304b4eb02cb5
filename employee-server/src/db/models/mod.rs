//! Database Models

pub mod employee;

// Re-exports
pub use employee::{Employee, EmployeePatch, NewEmployee};
