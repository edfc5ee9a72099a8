//! Domain layer - Core business entities
//!
//! The shop's three-level ownership tree: a `Customer` owns `Car`s and a
//! `Car` owns `Service` records.

pub mod car;
pub mod customer;
pub mod service;

pub use car::{Car, NewCar};
pub use customer::{Customer, NewCustomer, UpdateCustomer};
pub use service::{NewService, Service};
