//! Value Object Module

pub mod vehicle_type;
