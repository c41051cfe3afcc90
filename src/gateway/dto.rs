//! Wire schema of the CrossCore identity check request.
//!
//! Field order matches the order the provider documents, and is the order
//! `serde_json` emits, so the signed body is stable for a given request.

use serde::{Deserialize, Serialize};

/// Top level CrossCore request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossCoreApiRequest {
    pub header: Header,
    pub payload: Payload,
}

/// Tenant metadata taken from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Client identifier issued by the provider
    pub tenant_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub contacts: Vec<Contact>,
}

/// One subject of the check together with their addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub person: Person,
    pub addresses: Vec<ContactAddress>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_details: PersonDetails,
    /// Current name first; room for historical names
    pub names: Vec<Name>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    /// ISO calendar date, e.g. `1976-12-26`
    pub date_of_birth: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub first_name: String,
    pub sur_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddress {
    /// `CURRENT` or `PREVIOUS`
    pub address_type: String,
    pub post_town: String,
    pub street: String,
    pub postal: String,
}
