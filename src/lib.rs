//! Mergington High School activities API.
//!
//! Single-process CRUD service for viewing and managing signups for
//! extracurricular activities:
//! - Store: in-memory activity roster, seeded at startup
//! - Auth: file-backed teacher credentials, opaque bearer session tokens
//! - HTTP: Axum JSON endpoints, static assets under /static
//!
//! State is deliberately memory-resident and resets on restart.

pub mod auth;
pub mod error;
pub mod models;
pub mod rest;
pub mod store;
