//! Domain logic for the catering portfolio gallery.
//!
//! Everything in this crate is free of I/O: the backing store is reached
//! through the [`store::PortfolioStore`] trait, implemented in `catering-db`.

pub mod cache;
pub mod category;
pub mod clock;
pub mod error;
pub mod gallery;
pub mod image_url;
pub mod maintenance;
pub mod pagination;
pub mod portfolio;
pub mod store;
pub mod types;
