use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct BinaryAddress {
    #[serde(with = "base64_bytes")]
    pub(crate) addr: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub(crate) if_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct IpPrefix {
    pub(crate) ip: BinaryAddress,
    pub(crate) prefix_length: i16,
}

/// Interface configuration as reported by the agent.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDetail {
    pub(crate) interface_name: String,
    #[serde(default)]
    pub(crate) interface_id: i32,
    #[serde(default)]
    pub(crate) vlan_id: i32,
    #[serde(default)]
    pub(crate) router_id: i32,
    #[serde(default)]
    pub(crate) mac: String,
    #[serde(default)]
    pub(crate) address: Vec<IpPrefix>,
}

/// Interface identifier as given on the command line.
///
/// A plain decimal number is treated as the interface id, everything else as its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceRef {
    Id(i32),
    Name(String),
}

impl FromStr for InterfaceRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Interface identifier must not be empty"));
        }

        match s.parse::<i32>() {
            Ok(id) => Ok(InterfaceRef::Id(id)),
            Err(..) => Ok(InterfaceRef::Name(s.to_string())),
        }
    }
}

impl fmt::Display for InterfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceRef::Id(id) => write!(f, "{id}"),
            InterfaceRef::Name(name) => write!(f, "{name}"),
        }
    }
}

// Binary fields travel as standard base64 strings in JSON.
mod base64_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::decode(encoded).map_err(de::Error::custom)
    }
}
