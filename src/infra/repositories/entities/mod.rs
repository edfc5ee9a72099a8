//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod car;
pub mod customer;
pub mod service;
