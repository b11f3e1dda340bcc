//! Database models and queries

pub mod artists;
pub mod genres;
pub mod init;
pub mod models;
pub mod owners;
pub mod shows;
pub mod unit_of_work;
pub mod venues;

pub use init::*;
pub use models::*;
pub use unit_of_work::UnitOfWork;
