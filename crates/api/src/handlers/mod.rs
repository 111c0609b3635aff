pub mod admin_portfolio;
pub mod portfolio;
