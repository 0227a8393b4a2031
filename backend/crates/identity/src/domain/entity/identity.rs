//! Identity Entity
//!
//! A person or company together with the vehicles registered to it.

use crate::domain::value_object::vehicle_type::VehicleType;
use crate::error::{IdentityError, IdentityResult};

/// A single vehicle registration owned by an identity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    pub plate: String,
    pub oversized: bool,
    pub vehicle_type: VehicleType,
}

impl Registration {
    pub fn new(plate: impl Into<String>, oversized: bool, vehicle_type: VehicleType) -> Self {
        Self {
            plate: plate.into(),
            oversized,
            vehicle_type,
        }
    }
}

/// Identity entity
///
/// `id` is the store's partition key and never changes after creation.
/// The default value is the empty placeholder returned by a delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub company: bool,
    pub registrations: Vec<Registration>,
}

impl Identity {
    /// The empty identity returned after a successful delete
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Require `id` to be set
    pub fn validate_key(&self) -> IdentityResult<()> {
        require(&[("id", self.id.as_str())])
    }

    /// Require `email` and `phone` to be set
    pub fn validate_contact(&self) -> IdentityResult<()> {
        require(&[("email", self.email.as_str()), ("phone", self.phone.as_str())])
    }

    /// Require `id`, `email` and `phone` to be set
    pub fn validate_complete(&self) -> IdentityResult<()> {
        require(&[
            ("id", self.id.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
        ])
    }

    /// Take the mutable fields of `target` while keeping this identity's `id`
    pub fn replaced_by(&self, target: &Identity) -> Identity {
        Identity {
            id: self.id.clone(),
            email: target.email.clone(),
            phone: target.phone.clone(),
            company: target.company,
            registrations: target.registrations.clone(),
        }
    }
}

fn require(fields: &[(&str, &str)]) -> IdentityResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IdentityError::MissingRequiredFields(missing.join(", ")))
    }
}
