//! Domain types shared by the color ranker, the filter engine and the
//! catalog sources.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub type PolishId = String;

/// Group label for records that carry no collection.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Placeholder the catalog scrapers write for fields they could not read.
const NOT_AVAILABLE: &str = "N/A";

/// A catalog record exactly as the backend or a catalog file ships it.
///
/// Every field is optional and a field of the wrong JSON type reads as
/// absent; `PolishRecord::from_raw` decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawPolishRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: Option<String>,
    #[serde(rename = "hex", alias = "colorHex", alias = "color_hex", default, deserialize_with = "lenient_string")]
    pub hex: Option<String>,
    #[serde(rename = "color family", alias = "colorFamily", alias = "color_family", default, deserialize_with = "lenient_string")]
    pub color_family: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub finish: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub collection: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
}

/// A normalised, immutable catalog entry.
///
/// - `id`: unique within one loaded catalog, opaque otherwise
/// - `name`: display name, target of the free-text filter
/// - `color_hex`: `#RRGGBB` or `RRGGBB`; may still be malformed, the ranker
///   decides eligibility
/// - `color_family`/`finish`/`kind`/`brand`: facet attributes
/// - `collection`: grouping label, `None` means `UNCATEGORIZED`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolishRecord {
    pub id: PolishId,
    pub name: String,
    pub brand: Option<String>,
    pub color_hex: Option<String>,
    pub color_family: Option<String>,
    pub finish: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub collection: Option<String>,
    pub picture: Option<String>,
    pub link: Option<String>,
}

impl PolishRecord {
    /// Builds a minimal record; mostly useful for fixtures.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            color_hex: None,
            color_family: None,
            finish: None,
            kind: None,
            collection: None,
            picture: None,
            link: None,
        }
    }

    /// Returns `None` when the raw record has no usable `id` or `name`.
    pub fn from_raw(raw: RawPolishRecord) -> Option<Self> {
        let id = raw.id.as_ref().and_then(id_from_json)?;
        let name = clean(raw.name)?;
        Some(Self {
            id,
            name,
            brand: clean(raw.brand),
            color_hex: clean(raw.hex),
            color_family: clean(raw.color_family),
            finish: clean(raw.finish),
            kind: clean(raw.kind),
            collection: clean(raw.collection),
            picture: clean(raw.picture),
            link: clean(raw.link),
        })
    }

    pub fn facet_value(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::ColorFamily => self.color_family.as_deref(),
            Facet::Finish => self.finish.as_deref(),
            Facet::Brand => self.brand.as_deref(),
            Facet::Type => self.kind.as_deref(),
        }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn clean(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE) {
        return None;
    }
    Some(trimmed.to_string())
}

// Accepts strings, numbers and Mongo extended JSON (`{"$oid": "..."}`).
fn id_from_json(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => clean(Some(s.clone())),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Object(map) => map.get("$oid").and_then(id_from_json),
        _ => None,
    }
}

/// A named category of selectable tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    ColorFamily,
    Finish,
    Brand,
    Type,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::ColorFamily, Facet::Finish, Facet::Brand, Facet::Type];

    pub fn key(self) -> &'static str {
        match self {
            Facet::ColorFamily => "colorFamily",
            Facet::Finish => "finish",
            Facet::Brand => "brand",
            Facet::Type => "type",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Facet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colorFamily" | "color_family" | "color family" => Ok(Facet::ColorFamily),
            "finish" => Ok(Facet::Finish),
            "brand" => Ok(Facet::Brand),
            "type" | "kind" => Ok(Facet::Type),
            other => Err(Error::InvalidFacet(other.to_string())),
        }
    }
}

/// One entry of a result list. `distance` is only set in similarity mode.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedPolish {
    pub record: PolishRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl RankedPolish {
    pub fn unranked(record: PolishRecord) -> Self {
        Self { record, distance: None }
    }
}
