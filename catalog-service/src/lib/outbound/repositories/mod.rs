pub mod account;
pub mod product;
pub mod profile;

pub use account::PostgresAccountRepository;
pub use product::PostgresProductRepository;
pub use profile::PostgresProfileRepository;
