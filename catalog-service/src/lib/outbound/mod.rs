pub mod repositories;
pub mod store;
