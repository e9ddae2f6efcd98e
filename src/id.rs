use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Deserializer};

/// Freshdesk contact identifier
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct ContactId {
    value: u64,
}

/// Join key between a GitHub user and a Freshdesk contact.
///
/// Freshdesk hands the field back as whatever JSON type it was written with, so the value
/// is held in its string form and `42` and `"42"` compare equal.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct ExternalId {
    value: CompactString,
}

impl ContactId {
    pub fn new(id: u64) -> Self {
        Self { value: id }
    }
}

impl ExternalId {
    pub fn new<S: Into<CompactString>>(id: S) -> Self {
        Self { value: id.into() }
    }
}

impl From<u64> for ExternalId {
    fn from(id: u64) -> Self {
        Self::new(id.to_compact_string())
    }
}

impl<'de> Deserialize<'de> for ExternalId {
    fn deserialize<D>(deserializer: D) -> Result<ExternalId, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct ExternalIdVisitor;

        impl<'de> Visitor<'de> for ExternalIdVisitor {
            type Value = ExternalId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing an external ID")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ExternalId::new(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ExternalId::new(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ExternalId::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ExternalId::new(value.to_compact_string()))
            }
        }

        deserializer.deserialize_any(ExternalIdVisitor)
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<ContactId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u64::deserialize(deserializer)?;
        Ok(ContactId::new(id))
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::fmt::Display for ExternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_id_from_number_matches_string() {
        let from_number: ExternalId = serde_json::from_str("42").unwrap();
        let from_string: ExternalId = serde_json::from_str("\"42\"").unwrap();

        assert_eq!(from_number, from_string);
        assert_eq!(from_number, ExternalId::from(42));
    }

    #[test]
    fn external_id_rejects_non_scalar() {
        assert!(serde_json::from_str::<ExternalId>("[42]").is_err());
    }

    #[test]
    fn contact_id_displays_raw_value() {
        let id: ContactId = serde_json::from_str("7").unwrap();
        assert_eq!(id.to_string(), "7");
    }
}
