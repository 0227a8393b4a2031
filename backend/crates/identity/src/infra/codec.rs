//! Attribute-value codec
//!
//! Maps `Identity` to the store item layout and back:
//!
//! | attribute       | type | content                                    |
//! |-----------------|------|--------------------------------------------|
//! | `identifier`    | S    | partition key                              |
//! | `email`         | S    |                                            |
//! | `phone`         | S    |                                            |
//! | `company`       | BOOL |                                            |
//! | `registrations` | L    | one M per registration, in order           |
//!
//! Each registration map holds `plate` (S), `oversized` (BOOL) and
//! `vehicleType` (S). Decoding rejects items that miss an attribute or carry
//! the wrong type with `MalformedRecord`.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::domain::entity::identity::{Identity, Registration};
use crate::domain::value_object::vehicle_type::VehicleType;
use crate::error::{IdentityError, IdentityResult};

/// One store item
pub type Item = HashMap<String, AttributeValue>;

pub const KEY_ATTR: &str = "identifier";
pub const EMAIL_ATTR: &str = "email";
pub const PHONE_ATTR: &str = "phone";
pub const COMPANY_ATTR: &str = "company";
pub const REGISTRATIONS_ATTR: &str = "registrations";

const PLATE_ATTR: &str = "plate";
const OVERSIZED_ATTR: &str = "oversized";
const VEHICLE_TYPE_ATTR: &str = "vehicleType";

/// Primary key item for `id`
pub fn key_for(id: &str) -> Item {
    HashMap::from([(KEY_ATTR.to_string(), AttributeValue::S(id.to_string()))])
}

/// Full item for a put
pub fn encode_identity(identity: &Identity) -> Item {
    let mut item = encode_mutable_fields(identity);
    item.insert(KEY_ATTR.to_string(), AttributeValue::S(identity.id.clone()));
    item
}

/// Every attribute except the key; the SET clause of an update
pub fn encode_mutable_fields(identity: &Identity) -> Item {
    HashMap::from([
        (EMAIL_ATTR.to_string(), AttributeValue::S(identity.email.clone())),
        (PHONE_ATTR.to_string(), AttributeValue::S(identity.phone.clone())),
        (COMPANY_ATTR.to_string(), AttributeValue::Bool(identity.company)),
        (
            REGISTRATIONS_ATTR.to_string(),
            encode_registrations(&identity.registrations),
        ),
    ])
}

/// One nested map per registration, order preserved
pub fn encode_registrations(registrations: &[Registration]) -> AttributeValue {
    AttributeValue::L(
        registrations
            .iter()
            .map(|reg| {
                AttributeValue::M(HashMap::from([
                    (PLATE_ATTR.to_string(), AttributeValue::S(reg.plate.clone())),
                    (OVERSIZED_ATTR.to_string(), AttributeValue::Bool(reg.oversized)),
                    (
                        VEHICLE_TYPE_ATTR.to_string(),
                        AttributeValue::S(reg.vehicle_type.code().to_string()),
                    ),
                ]))
            })
            .collect(),
    )
}

pub fn decode_identity(item: &Item) -> IdentityResult<Identity> {
    let id = string_attr(item, KEY_ATTR, "item")?;
    let context = format!("identity '{}'", id);

    Ok(Identity {
        email: string_attr(item, EMAIL_ATTR, &context)?,
        phone: string_attr(item, PHONE_ATTR, &context)?,
        company: bool_attr(item, COMPANY_ATTR, &context)?,
        registrations: decode_registrations(item, &context)?,
        id,
    })
}

/// A missing `registrations` attribute reads as an empty list
fn decode_registrations(item: &Item, context: &str) -> IdentityResult<Vec<Registration>> {
    let list = match item.get(REGISTRATIONS_ATTR) {
        None | Some(AttributeValue::Null(_)) => return Ok(Vec::new()),
        Some(value) => value.as_l().map_err(|_| {
            malformed(context, REGISTRATIONS_ATTR, "expected a list (L)")
        })?,
    };

    list.iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry_context = format!("{} registration #{}", context, index);
            let map = entry
                .as_m()
                .map_err(|_| malformed(&entry_context, REGISTRATIONS_ATTR, "expected a map (M)"))?;

            Ok(Registration {
                plate: string_attr(map, PLATE_ATTR, &entry_context)?,
                oversized: bool_attr(map, OVERSIZED_ATTR, &entry_context)?,
                vehicle_type: VehicleType::from_code(&string_attr(
                    map,
                    VEHICLE_TYPE_ATTR,
                    &entry_context,
                )?),
            })
        })
        .collect()
}

fn string_attr(item: &Item, name: &str, context: &str) -> IdentityResult<String> {
    match item.get(name) {
        Some(value) => value
            .as_s()
            .cloned()
            .map_err(|_| malformed(context, name, "expected a string (S)")),
        None => Err(malformed(context, name, "attribute missing")),
    }
}

fn bool_attr(item: &Item, name: &str, context: &str) -> IdentityResult<bool> {
    match item.get(name) {
        Some(value) => value
            .as_bool()
            .copied()
            .map_err(|_| malformed(context, name, "expected a boolean (BOOL)")),
        None => Err(malformed(context, name, "attribute missing")),
    }
}

fn malformed(context: &str, attribute: &str, problem: &str) -> IdentityError {
    IdentityError::MalformedRecord(format!("{}: '{}' {}", context, attribute, problem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_registrations() -> Identity {
        Identity {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            phone: "555".to_string(),
            company: false,
            registrations: vec![
                Registration::new("ABC1", false, VehicleType::Car),
                Registration::new("XYZ2", true, VehicleType::Truck),
            ],
        }
    }

    #[test]
    fn test_every_registration_gets_its_own_map() {
        let encoded = encode_registrations(&two_registrations().registrations);
        let list = encoded.as_l().unwrap();
        assert_eq!(list.len(), 2);

        let first = list[0].as_m().unwrap();
        let second = list[1].as_m().unwrap();
        assert_eq!(first.get("plate").unwrap().as_s().unwrap(), "ABC1");
        assert_eq!(first.get("vehicleType").unwrap().as_s().unwrap(), "car");
        assert_eq!(second.get("plate").unwrap().as_s().unwrap(), "XYZ2");
        assert!(*second.get("oversized").unwrap().as_bool().unwrap());
    }

    #[test]
    fn test_no_registrations_encodes_empty_list() {
        let encoded = encode_registrations(&[]);
        assert!(encoded.as_l().unwrap().is_empty());
    }

    #[test]
    fn test_item_layout() {
        let item = encode_identity(&two_registrations());
        assert_eq!(item.len(), 5);
        assert_eq!(item.get("identifier").unwrap().as_s().unwrap(), "u1");
        assert_eq!(item.get("email").unwrap().as_s().unwrap(), "a@b.com");
        assert_eq!(item.get("phone").unwrap().as_s().unwrap(), "555");
        assert!(!*item.get("company").unwrap().as_bool().unwrap());

        let fields = encode_mutable_fields(&two_registrations());
        assert!(!fields.contains_key("identifier"));
    }

    #[test]
    fn test_decode_restores_registrations_in_order() {
        let identity = two_registrations();
        let decoded = decode_identity(&encode_identity(&identity)).unwrap();
        assert_eq!(decoded, identity);
    }

    #[test]
    fn test_decode_unknown_vehicle_type() {
        let mut item = encode_identity(&two_registrations());
        item.insert(
            "registrations".to_string(),
            AttributeValue::L(vec![AttributeValue::M(HashMap::from([
                ("plate".to_string(), AttributeValue::S("Q1".to_string())),
                ("oversized".to_string(), AttributeValue::Bool(false)),
                ("vehicleType".to_string(), AttributeValue::S("tram".to_string())),
            ]))]),
        );

        let decoded = decode_identity(&item).unwrap();
        assert_eq!(decoded.registrations[0].vehicle_type, VehicleType::Unknown);
    }

    #[test]
    fn test_decode_missing_registrations_is_empty() {
        let mut item = encode_identity(&two_registrations());
        item.remove("registrations");
        assert!(decode_identity(&item).unwrap().registrations.is_empty());
    }

    #[test]
    fn test_decode_missing_attribute_is_malformed() {
        let mut item = encode_identity(&two_registrations());
        item.remove("phone");

        match decode_identity(&item) {
            Err(IdentityError::MalformedRecord(detail)) => {
                assert!(detail.contains("phone"));
                assert!(detail.contains("u1"));
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_wrong_type_is_malformed() {
        let mut item = encode_identity(&two_registrations());
        item.insert("company".to_string(), AttributeValue::S("yes".to_string()));
        assert!(matches!(
            decode_identity(&item),
            Err(IdentityError::MalformedRecord(_))
        ));

        let mut item = encode_identity(&two_registrations());
        item.insert(
            "registrations".to_string(),
            AttributeValue::L(vec![AttributeValue::S("ABC1".to_string())]),
        );
        assert!(matches!(
            decode_identity(&item),
            Err(IdentityError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_decode_without_key_is_malformed() {
        let mut item = encode_identity(&two_registrations());
        item.remove("identifier");
        assert!(matches!(
            decode_identity(&item),
            Err(IdentityError::MalformedRecord(_))
        ));
    }
}
