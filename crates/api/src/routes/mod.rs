//! Route definitions. The tree is assembled in [`crate::router`].

pub mod health;
pub mod portfolio;
