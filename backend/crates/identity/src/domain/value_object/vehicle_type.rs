use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of vehicle behind a registration.
///
/// Codes outside the known set decode to `Unknown` instead of failing, so a
/// record written by a newer client still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleType {
    Car,
    Van,
    Truck,
    Motorcycle,
    Bus,
    #[default]
    Unknown,
}

impl VehicleType {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use VehicleType::*;
        match self {
            Car => "car",
            Van => "van",
            Truck => "truck",
            Motorcycle => "motorcycle",
            Bus => "bus",
            Unknown => "unknown",
        }
    }

    pub fn from_code(code: &str) -> Self {
        use VehicleType::*;
        match code.trim().to_ascii_lowercase().as_str() {
            "car" => Car,
            "van" => Van,
            "truck" => Truck,
            "motorcycle" => Motorcycle,
            "bus" => Bus,
            other => {
                if other != "unknown" && !other.is_empty() {
                    tracing::debug!(code = %code, "Unrecognised vehicle type code");
                }
                Unknown
            }
        }
    }

    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, VehicleType::Unknown)
    }
}

impl From<String> for VehicleType {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<VehicleType> for String {
    fn from(vehicle_type: VehicleType) -> Self {
        vehicle_type.code().to_string()
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
