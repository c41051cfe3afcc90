use crate::{
    error::{Error, Result},
    gateway::dto::{
        Contact, ContactAddress, CrossCoreApiRequest, Header, Name, Payload, Person,
        PersonDetails,
    },
    identity::{Address, PersonIdentity},
};

/// Translates a [`PersonIdentity`] into the provider's request schema.
///
/// The mapper holds nothing but the tenant id and performs no I/O.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossCoreApiRequestMapper {
    tenant_id: String,
}

impl CrossCoreApiRequestMapper {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        CrossCoreApiRequestMapper {
            tenant_id: tenant_id.into(),
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Builds the request for a single person.
    ///
    /// Produces exactly one contact. Addresses are carried over in input order;
    /// an empty address list is mapped to an empty list.
    ///
    /// # Arguments
    ///
    /// * `person_identity` - The person to check. `None` fails with `Error::InvalidArgument`.
    pub fn map_person_identity(
        &self,
        person_identity: Option<&PersonIdentity>,
    ) -> Result<CrossCoreApiRequest> {
        let person_identity = person_identity.ok_or_else(|| Error::missing("personIdentity"))?;

        let person = Person {
            person_details: PersonDetails {
                date_of_birth: person_identity.date_of_birth.format("%Y-%m-%d").to_string(),
            },
            names: vec![Name {
                first_name: person_identity.first_name.clone(),
                sur_name: person_identity.surname.clone(),
            }],
        };

        let addresses = person_identity
            .addresses
            .iter()
            .map(map_address)
            .collect();

        Ok(CrossCoreApiRequest {
            header: Header {
                tenant_id: self.tenant_id.clone(),
            },
            payload: Payload {
                contacts: vec![Contact { person, addresses }],
            },
        })
    }
}

fn map_address(address: &Address) -> ContactAddress {
    ContactAddress {
        address_type: address.address_type.to_string(),
        post_town: address.post_town.clone(),
        street: address.street.clone(),
        postal: address.postal.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{identity::AddressType, test_support::test_person_identity};

    const TENANT_ID: &str = "tenant-id";

    #[test]
    fn maps_current_address() {
        let mapper = CrossCoreApiRequestMapper::new(TENANT_ID);
        let person = test_person_identity(AddressType::Current);

        let result = mapper.map_person_identity(Some(&person)).unwrap();

        assert_eq!(result.header.tenant_id, TENANT_ID);
        assert_eq!(result.payload.contacts.len(), 1);
        let contact = &result.payload.contacts[0];
        assert_eq!(contact.person.person_details.date_of_birth, "1976-12-26");
        assert_eq!(contact.person.names.len(), 1);
        assert_eq!(contact.person.names[0].first_name, "Jane");
        assert_eq!(contact.person.names[0].sur_name, "Doe");
        assert_eq!(contact.addresses.len(), 1);
        assert_eq!(contact.addresses[0].address_type, "CURRENT");
        assert_eq!(contact.addresses[0].post_town, "PostTown");
        assert_eq!(contact.addresses[0].street, "Street Name");
        assert_eq!(contact.addresses[0].postal, "Postcode");
    }

    #[test]
    fn maps_previous_address_changing_only_the_type() {
        let mapper = CrossCoreApiRequestMapper::new(TENANT_ID);

        let current = mapper
            .map_person_identity(Some(&test_person_identity(AddressType::Current)))
            .unwrap();
        let previous = mapper
            .map_person_identity(Some(&test_person_identity(AddressType::Previous)))
            .unwrap();

        let address = &previous.payload.contacts[0].addresses[0];
        assert_eq!(address.address_type, "PREVIOUS");

        let mut expected = current.clone();
        expected.payload.contacts[0].addresses[0].address_type = "PREVIOUS".to_owned();
        assert_eq!(previous, expected);
    }

    #[test]
    fn preserves_address_order() {
        let mapper = CrossCoreApiRequestMapper::new(TENANT_ID);
        let mut person = test_person_identity(AddressType::Current);
        person.addresses.push(Address {
            address_type: AddressType::Previous,
            post_town: "Oldtown".to_owned(),
            street: "1 Old Road".to_owned(),
            postal: "OL1 1DD".to_owned(),
        });
        person.addresses.push(Address {
            address_type: AddressType::Previous,
            post_town: "Oldertown".to_owned(),
            street: "2 Older Road".to_owned(),
            postal: "OL2 2DD".to_owned(),
        });

        let result = mapper.map_person_identity(Some(&person)).unwrap();

        let towns: Vec<&str> = result.payload.contacts[0]
            .addresses
            .iter()
            .map(|a| a.post_town.as_str())
            .collect();
        assert_eq!(towns, vec!["PostTown", "Oldtown", "Oldertown"]);
    }

    #[test]
    fn maps_person_without_addresses() {
        let mapper = CrossCoreApiRequestMapper::new(TENANT_ID);
        let mut person = test_person_identity(AddressType::Current);
        person.addresses.clear();

        let result = mapper.map_person_identity(Some(&person)).unwrap();

        assert_eq!(result.payload.contacts.len(), 1);
        assert!(result.payload.contacts[0].addresses.is_empty());
    }

    #[test]
    fn missing_person_identity_is_rejected() {
        let mapper = CrossCoreApiRequestMapper::new(TENANT_ID);

        let err = mapper.map_person_identity(None).unwrap_err();

        match err {
            Error::InvalidArgument(msg) => assert_eq!(msg, "personIdentity must not be null"),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn serializes_to_wire_shape() {
        let mapper = CrossCoreApiRequestMapper::new(TENANT_ID);
        let person = test_person_identity(AddressType::Current);

        let request = mapper.map_person_identity(Some(&person)).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        let expected = serde_json::json!({
            "header": { "tenantId": "tenant-id" },
            "payload": {
                "contacts": [{
                    "person": {
                        "personDetails": { "dateOfBirth": "1976-12-26" },
                        "names": [{ "firstName": "Jane", "surName": "Doe" }]
                    },
                    "addresses": [{
                        "addressType": "CURRENT",
                        "postTown": "PostTown",
                        "street": "Street Name",
                        "postal": "Postcode"
                    }]
                }]
            }
        });
        assert_eq!(value, expected);
    }
}
