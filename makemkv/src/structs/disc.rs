use serde::{Deserialize, Serialize};

use crate::codes::attributes::Field;
use crate::structs::value::{DiscType, Value};
use crate::structs::{parsed, text};
use crate::utils::errors::TranslateError;

/// Disc level information from `CINFO` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub disc_type: Option<DiscType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_langcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Disc {
    const ENTITY: &'static str = "disc";

    /// Sets a translated attribute. Last write wins.
    pub fn set(&mut self, field: Field, value: Value) -> Result<(), TranslateError> {
        match field {
            Field::Type => self.disc_type = parsed(Self::ENTITY, field, value)?,
            Field::Name => self.name = text(value),
            Field::MetadataLangcode => self.metadata_langcode = text(value),
            Field::MetadataLanguage => self.metadata_language = text(value),
            Field::Information => self.information = text(value),
            Field::VolumeName => self.volume_name = text(value),
            Field::Comment => self.comment = text(value),
            _ => {
                return Err(TranslateError::NoSuchField {
                    entity: Self::ENTITY,
                    field,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_fields() -> anyhow::Result<()> {
        let mut disc = Disc::default();
        disc.set(Field::Type, Value::Text("BD".into()))?;
        disc.set(Field::VolumeName, Value::Text("FOO_BAR".into()))?;
        assert_eq!(disc.disc_type, Some(DiscType::Bluray));
        assert_eq!(disc.volume_name.as_deref(), Some("FOO_BAR"));
        Ok(())
    }

    #[test]
    fn reject_foreign_fields() {
        let mut disc = Disc::default();
        let err = disc.set(Field::OrderWeight, Value::Integer(0)).unwrap_err();
        assert!(matches!(err, TranslateError::NoSuchField { .. }));
        assert_eq!(disc, Disc::default());
    }

    #[test]
    fn reject_unknown_type() {
        let mut disc = Disc::default();
        assert!(disc.set(Field::Type, Value::Text("Blu-ray disc".into())).is_err());
        assert!(disc.set(Field::Type, Value::Integer(1)).is_err());
        assert_eq!(disc.disc_type, None);
    }
}
