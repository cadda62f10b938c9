pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::account;
pub use domain::product;
pub use domain::profile;
pub use outbound::repositories;
