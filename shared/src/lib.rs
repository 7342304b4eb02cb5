//! Shared types for the employee records service
//!
//! Wire DTOs used by both the server and its clients: employee payloads,
//! auth request/response bodies and the serde helpers they rely on.

pub mod client;
pub mod models;
pub mod serde_helpers;

// Re-exports
pub use client::{LoginRequest, LoginResponse, MessageResponse, RegisterResponse};
pub use models::{EmployeeCreate, EmployeeResponse, EmployeeUpdate};
pub use serde::{Deserialize, Serialize};
