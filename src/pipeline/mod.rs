//! Pipeline module - loading, normalization and the four cleaning stages

pub mod dates;
pub mod employee;
pub mod engagement;
pub mod error;
pub mod impute;
pub mod loader;
pub mod paths;
pub mod recruitment;
pub mod schema;
pub mod training;

pub use dates::*;
pub use employee::*;
pub use engagement::*;
pub use error::*;
pub use impute::*;
pub use loader::*;
pub use paths::*;
pub use recruitment::*;
pub use schema::*;
pub use training::*;
