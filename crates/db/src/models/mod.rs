pub mod portfolio_image;
