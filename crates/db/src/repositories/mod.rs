pub mod portfolio_image_repo;

pub use portfolio_image_repo::PortfolioImageRepo;
