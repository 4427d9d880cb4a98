pub mod product;
pub mod sale;
pub mod store;
