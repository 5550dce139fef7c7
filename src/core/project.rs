//! The project record.
//!
//! Field names on the wire match the original store layout exactly
//! (`imageData` camel-cased, everything else lowercase) so existing
//! payloads under the `cosplay-projects-v1` key keep loading.

use serde::{Deserialize, Serialize};

use super::identity::ProjectId;

/// Title shown for records saved without a character name.
pub const UNNAMED: &str = "unnamed";

/// One cosplay project.
///
/// `hours` and `cost` pass through lenient coercion on deserialization:
/// missing, null, non-numeric or negative inputs all land at 0. Everything
/// else is stored as entered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    #[serde(default)]
    pub character: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub hours: f64,

    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub favorite: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<String>,

    /// Opaque encoded image (a data URI). Serialized even when null: the
    /// original store always wrote the key.
    #[serde(rename = "imageData", default)]
    pub image_data: Option<String>,
}

impl Project {
    /// Minimal record with a fresh identity; numeric fields at 0.
    pub fn new(character: impl Into<String>) -> Self {
        Self {
            id: ProjectId::generate(),
            character: character.into(),
            series: None,
            category: None,
            status: None,
            hours: 0.0,
            cost: 0.0,
            date: None,
            favorite: false,
            materials: None,
            image_data: None,
        }
    }

    /// Character name, or the placeholder when empty.
    pub fn display_title(&self) -> &str {
        if self.character.trim().is_empty() {
            UNNAMED
        } else {
            &self.character
        }
    }
}

/// Coerce whatever the store holds into a non-negative f64.
///
/// Accepts numbers, numeric strings, null and absent values; anything
/// unparseable or negative becomes 0. Mirrors the submit-side coercion so
/// persisted records and fresh input follow one rule.
pub fn coerce_non_negative(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .unwrap_or(0.0)
}

mod lenient_f64 {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Null(Option<()>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let n = match Raw::deserialize(deserializer)? {
            Raw::Num(n) => n,
            Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Raw::Null(_) => 0.0,
        };
        Ok(if n.is_finite() && n >= 0.0 { n } else { 0.0 })
    }
}
