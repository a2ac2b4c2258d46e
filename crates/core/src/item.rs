//! Catalog item records and the validated create payload.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{CatalogError, Result};

/// Item identifier as found in the collection file.
///
/// Ids assigned by the service are integers (milliseconds since the epoch).
/// Hand-edited collections may also carry string ids, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl ItemId {
    /// Integer value, if this is a numeric id.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// String value, if this is a string id.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

/// A catalog entry.
///
/// Fields the catalog does not know about are kept in `extra` so that a
/// rewrite of the collection never drops them. Hand-edited records may lack
/// `name`, `category` or `price` or carry `null` there; those read as empty
/// or zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    #[must_use]
    pub fn new(id: ItemId, name: &str, category: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_owned(),
            category: category.to_owned(),
            price,
            extra: Map::new(),
        }
    }

    /// Builds the stored record for a validated payload.
    #[must_use]
    pub fn from_new(id: ItemId, new: NewItem) -> Self {
        Self { id, name: new.name, category: new.category, price: new.price, extra: new.extra }
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle_lower` must already be lower-cased.
    #[must_use]
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

/// Validated payload for creating an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewItem {
    /// Validates a raw JSON body.
    ///
    /// `name` and `category` must be non-blank strings and `price` a finite,
    /// non-negative number. Any client-supplied `id` is discarded; the store
    /// assigns ids. Other fields are carried through unchanged.
    ///
    /// # Errors
    /// Returns `CatalogError::Validation` naming the first offending field.
    pub fn from_json(body: Value) -> Result<Self> {
        let Value::Object(mut fields) = body else {
            return Err(CatalogError::Validation("body must be a JSON object".to_owned()));
        };
        fields.remove("id");

        let name = take_text(&mut fields, "name")?;
        let category = take_text(&mut fields, "category")?;
        let price = match fields.remove("price") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(_) => {
                return Err(CatalogError::Validation("price must be a number".to_owned()));
            },
            None => return Err(CatalogError::Validation("price is required".to_owned())),
        };
        let price = price
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| CatalogError::Validation("price must be a non-negative number".to_owned()))?;

        Ok(Self { name, category, price, extra: fields })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Result<String> {
    match fields.remove(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
        Some(Value::String(_)) => Err(CatalogError::Validation(format!("{key} must not be blank"))),
        Some(_) => Err(CatalogError::Validation(format!("{key} must be a string"))),
        None => Err(CatalogError::Validation(format!("{key} is required"))),
    }
}
