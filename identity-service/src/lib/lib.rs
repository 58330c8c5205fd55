pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::identity;
pub use outbound::repositories;
