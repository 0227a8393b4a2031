//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::identity::{Identity, Registration};
pub use repository::IdentityRepository;
pub use value_object::vehicle_type::VehicleType;
