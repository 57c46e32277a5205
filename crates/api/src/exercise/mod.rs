pub mod api;
mod error;
mod model;
pub mod repository;
pub mod validation;

pub use self::api::*;
pub use self::error::*;
pub use self::model::*;
pub use self::repository::*;
pub use self::validation::{validate, ValidationError};
