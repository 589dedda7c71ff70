//! Route handlers
//!
//! Central registry: /organizations, /users
//! Tenant scoped (X-Tenant-ID): /kindergartens

pub mod health;
pub mod kindergartens;
pub mod organizations;
pub mod users;
pub mod utils;
