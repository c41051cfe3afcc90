use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person submitted for an identity check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonIdentity {
    /// Given name
    pub first_name: String,
    /// Family name
    pub surname: String,
    /// Date of birth, serialized as `YYYY-MM-DD`
    pub date_of_birth: NaiveDate,
    /// Addresses in the order the caller supplied them
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// A postal address held by the person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Whether this is where the person lives now
    pub address_type: AddressType,
    pub post_town: String,
    pub street: String,
    pub postal: String,
}

/// Distinguishes the current residence from previously held addresses.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum AddressType {
    #[serde(rename = "CURRENT")]
    #[strum(serialize = "CURRENT")]
    Current,
    #[serde(rename = "PREVIOUS")]
    #[strum(serialize = "PREVIOUS")]
    Previous,
}
