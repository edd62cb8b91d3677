//! Domain models.

pub mod generation;
pub mod product;
pub mod session;
pub mod user;
