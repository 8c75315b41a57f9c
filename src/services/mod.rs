// Service exports
pub mod postgres;

pub use postgres::{LostPetFilter, PostgresClient, PostgresError};
