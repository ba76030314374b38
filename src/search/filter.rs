use crate::models::PropertyType;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Search constraints supplied by a caller. An absent field places no
/// constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring of the city
    #[serde(default, deserialize_with = "blank_as_none")]
    pub city: Option<String>,
    /// Case-insensitive substring of the state
    #[serde(default, deserialize_with = "blank_as_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub property_type: Option<PropertyType>,
    /// Inclusive lower bound on the nightly list price
    #[serde(default, deserialize_with = "blank_as_finite")]
    pub min_price: Option<f64>,
    /// Inclusive upper bound on the nightly list price
    #[serde(default, deserialize_with = "blank_as_finite")]
    pub max_price: Option<f64>,
    /// Minimum number of bedrooms
    #[serde(default, deserialize_with = "blank_as_none")]
    pub bedrooms: Option<u32>,
    /// Minimum number of bathrooms
    #[serde(default, deserialize_with = "blank_as_finite")]
    pub bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
    /// 1-indexed page number
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
}

impl FilterSpec {
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    pub fn bathrooms(mut self, bathrooms: f64) -> Self {
        self.bathrooms = Some(bathrooms);
        self
    }

    pub fn page(mut self, page: i64, limit: i64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// Query strings carry every value as text; an empty one means "not given".
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let text = raw.into_string();
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<T>().map(Some).map_err(de::Error::custom)
}

/// As [`blank_as_none`], but `NaN` and infinities are rejected.
fn blank_as_finite<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match blank_as_none::<D, f64>(deserializer)? {
        Some(value) if !value.is_finite() => Err(de::Error::custom(format!(
            "expected a finite number, got '{value}'"
        ))),
        value => Ok(value),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Integer(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}
