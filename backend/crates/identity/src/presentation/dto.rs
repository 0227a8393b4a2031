//! API DTOs (Data Transfer Objects)
//!
//! Every field is optional on input and decodes to its zero value.

use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::{Identity, Registration};
use crate::domain::value_object::vehicle_type::VehicleType;

// ============================================================================
// Identity
// ============================================================================

/// One vehicle registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationDto {
    pub plate: String,
    pub oversized: bool,
    pub vehicle_type: VehicleType,
}

/// Identity document, used as request body and inside responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityDto {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub company: bool,
    pub registrations: Vec<RegistrationDto>,
}

impl From<RegistrationDto> for Registration {
    fn from(dto: RegistrationDto) -> Self {
        Registration::new(dto.plate, dto.oversized, dto.vehicle_type)
    }
}

impl From<Registration> for RegistrationDto {
    fn from(registration: Registration) -> Self {
        Self {
            plate: registration.plate,
            oversized: registration.oversized,
            vehicle_type: registration.vehicle_type,
        }
    }
}

impl From<IdentityDto> for Identity {
    fn from(dto: IdentityDto) -> Self {
        Identity {
            id: dto.id,
            email: dto.email,
            phone: dto.phone,
            company: dto.company,
            registrations: dto.registrations.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Identity> for IdentityDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            phone: identity.phone,
            company: identity.company,
            registrations: identity.registrations.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// `{"identity": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub identity: IdentityDto,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

/// `{"identities": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityListResponse {
    pub identities: Vec<IdentityDto>,
}

impl From<Vec<Identity>> for IdentityListResponse {
    fn from(identities: Vec<Identity>) -> Self {
        Self {
            identities: identities.into_iter().map(Into::into).collect(),
        }
    }
}
