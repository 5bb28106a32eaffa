//! Domain building blocks shared by the API and database crates.
//!
//! Everything here is pure logic: request validation rules, the per-DTO
//! rule registry, and the core error type. No I/O, no async.

pub mod error;
pub mod validation;
