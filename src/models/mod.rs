mod sample;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use sample::sample_properties;

/// Oldest construction year accepted for a listing
pub const MIN_YEAR_BUILT: u32 = 1800;

/// Category of a rental property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    #[serde(rename = "Single Family")]
    SingleFamily,
    Condo,
    Townhouse,
    Villa,
    Cabin,
    Cottage,
    Apartment,
    Loft,
}

impl PropertyType {
    pub const ALL: [PropertyType; 8] = [
        PropertyType::SingleFamily,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Villa,
        PropertyType::Cabin,
        PropertyType::Cottage,
        PropertyType::Apartment,
        PropertyType::Loft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "Single Family",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Villa => "Villa",
            PropertyType::Cabin => "Cabin",
            PropertyType::Cottage => "Cottage",
            PropertyType::Apartment => "Apartment",
            PropertyType::Loft => "Loft",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    /// Exact, case-sensitive match on the display name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown property type '{s}'"))
    }
}

/// Market status of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ListingStatus {
    #[default]
    #[serde(rename = "For Rent")]
    ForRent,
    #[serde(rename = "For Sale")]
    ForSale,
    Rented,
    Sold,
    Pending,
}

/// Postal address of a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub formatted_address: String,
}

impl Address {
    /// Single-line rendering, e.g. `123 Mountain View Dr, Aspen, CO 81611`
    pub fn format(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.line1, self.city, self.state, self.zip_code
        )
    }

    fn fill_formatted(&mut self) {
        if self.formatted_address.trim().is_empty() {
            self.formatted_address = self.format();
        }
    }
}

/// Physical attributes of a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Physical {
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_footage: u32,
    pub lot_size: f64,
    pub year_built: u32,
}

impl Physical {
    fn validate(&self) -> Result<(), ValidationError> {
        non_negative("physical.bathrooms", self.bathrooms)?;
        non_negative("physical.lotSize", self.lot_size)?;
        if self.year_built < MIN_YEAR_BUILT {
            return Err(ValidationError::Invalid(format!(
                "physical.yearBuilt must be at least {MIN_YEAR_BUILT}, got {}",
                self.year_built
            )));
        }
        Ok(())
    }
}

/// Pricing of a property. `list_price` is the nightly price searched on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Financial {
    pub list_price: f64,
    pub monthly_rent: f64,
    pub price_per_square_foot: f64,
}

impl Financial {
    fn validate(&self) -> Result<(), ValidationError> {
        non_negative("financial.listPrice", self.list_price)?;
        non_negative("financial.monthlyRent", self.monthly_rent)?;
        non_negative("financial.pricePerSquareFoot", self.price_per_square_foot)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Host summary embedded in each listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Host {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub check_in: String,
    pub check_out: String,
    pub min_stay: u32,
    pub max_stay: u32,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            check_in: "15:00".to_string(),
            check_out: "11:00".to_string(),
            min_stay: 1,
            max_stay: 30,
        }
    }
}

impl Availability {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.min_stay < 1 || self.max_stay < 1 {
            return Err(ValidationError::Invalid(
                "availability.minStay and availability.maxStay must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_id: String,
    pub rating: f64,
    pub comment: String,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub date: DateTime<Utc>,
}

/// Aggregated guest ratings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ratings {
    pub average: f64,
    pub count: u32,
    pub reviews: Vec<Review>,
}

impl Ratings {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=5.0).contains(&self.average) {
            return Err(ValidationError::Invalid(format!(
                "ratings.average must be within [0, 5], got {}",
                self.average
            )));
        }
        if let Some(review) = self
            .reviews
            .iter()
            .find(|r| !(1.0..=5.0).contains(&r.rating))
        {
            return Err(ValidationError::Invalid(format!(
                "review rating must be within [1, 5], got {}",
                review.rating
            )));
        }
        Ok(())
    }
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub property_id: String,
    pub address: Address,
    pub physical: Physical,
    pub financial: Financial,
    pub property_type: PropertyType,
    #[serde(default)]
    pub listing_status: ListingStatus,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    /// Always set on listings created here; third-party listings may omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Host>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub ratings: Ratings,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub list_date: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Check every bounded attribute of the record
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.property_id.trim().is_empty() {
            return Err(ValidationError::MissingField("propertyId"));
        }
        self.physical.validate()?;
        self.financial.validate()?;
        self.availability.validate()?;
        self.ratings.validate()
    }

    /// Merge an update into this record and refresh `updated_at`
    pub fn apply(&mut self, update: PropertyUpdate, now: DateTime<Utc>) {
        let PropertyUpdate {
            address,
            physical,
            financial,
            property_type,
            listing_status,
            photos,
            description,
            features,
            location,
            host,
            amenities,
            rules,
            availability,
        } = update;

        if let Some(mut address) = address {
            address.fill_formatted();
            self.address = address;
        }
        if let Some(physical) = physical {
            self.physical = physical;
        }
        if let Some(financial) = financial {
            self.financial = financial;
        }
        if let Some(property_type) = property_type {
            self.property_type = property_type;
        }
        if let Some(listing_status) = listing_status {
            self.listing_status = listing_status;
        }
        if let Some(photos) = photos {
            self.photos = photos;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(features) = features {
            self.features = features;
        }
        if location.is_some() {
            self.location = location;
        }
        if host.is_some() {
            self.host = host;
        }
        if let Some(amenities) = amenities {
            self.amenities = amenities;
        }
        if let Some(rules) = rules {
            self.rules = rules;
        }
        if let Some(availability) = availability {
            self.availability = availability;
        }
        self.updated_at = now;
    }
}

/// Body of a create request. Required fields are optional here so a
/// missing one can be reported by name instead of as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub property_id: Option<String>,
    pub address: Option<Address>,
    pub physical: Option<Physical>,
    pub financial: Option<Financial>,
    pub property_type: Option<PropertyType>,
    pub host: Option<Host>,
    #[serde(default)]
    pub listing_status: ListingStatus,
    #[serde(default)]
    pub photos: Vec<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
}

impl PropertyDraft {
    /// Turn the draft into a new record stamped at `now`, with empty ratings
    pub fn into_property(self, now: DateTime<Utc>) -> Result<Property, ValidationError> {
        let property_id = self
            .property_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ValidationError::MissingField("propertyId"))?;
        let mut address = self
            .address
            .ok_or(ValidationError::MissingField("address"))?;
        let physical = self
            .physical
            .ok_or(ValidationError::MissingField("physical"))?;
        let financial = self
            .financial
            .ok_or(ValidationError::MissingField("financial"))?;
        let property_type = self
            .property_type
            .ok_or(ValidationError::MissingField("propertyType"))?;
        let host = self.host.ok_or(ValidationError::MissingField("host"))?;

        address.fill_formatted();

        let property = Property {
            property_id,
            address,
            physical,
            financial,
            property_type,
            listing_status: self.listing_status,
            photos: self.photos,
            description: self.description,
            features: self.features,
            location: self.location,
            host: Some(host),
            amenities: self.amenities,
            rules: self.rules,
            availability: self.availability,
            ratings: Ratings::default(),
            list_date: now,
            created_at: now,
            updated_at: now,
        };
        property.validate()?;
        Ok(property)
    }
}

/// Partial update of a property. Present fields replace the stored ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<Physical>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial: Option<Financial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_status: Option<ListingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Host>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

impl PropertyUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(physical) = &self.physical {
            physical.validate()?;
        }
        if let Some(financial) = &self.financial {
            financial.validate()?;
        }
        if let Some(availability) = &self.availability {
            availability.validate()?;
        }
        Ok(())
    }

    /// Address with its formatted line filled in, as it will be stored
    pub fn normalized(mut self) -> Self {
        if let Some(address) = self.address.as_mut() {
            address.fill_formatted();
        }
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Invalid(String),
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::Invalid(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Timestamps are RFC 3339 strings with millisecond precision in JSON and
/// native BSON datetimes in the document store. Either form is read back,
/// as are bare `YYYY-MM-DD` dates (midnight UTC).
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use mongodb::bson::{self, Bson};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
        } else {
            bson::DateTime::from_chrono(*value).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match Bson::deserialize(deserializer)? {
            Bson::DateTime(value) => Ok(value.to_chrono()),
            Bson::String(raw) => {
                parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
            }
            other => Err(de::Error::custom(format!(
                "expected a timestamp, got {:?}",
                other.element_type()
            ))),
        }
    }

    /// Store representation, for filters and `$set` documents
    pub fn to_bson(value: DateTime<Utc>) -> Bson {
        Bson::DateTime(bson::DateTime::from_chrono(value))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft_json() -> serde_json::Value {
        json!({
            "propertyId": "prop_100",
            "address": {
                "line1": "1 Ridge Rd",
                "city": "Aspen",
                "state": "CO",
                "zipCode": "81611"
            },
            "physical": {
                "bedrooms": 2,
                "bathrooms": 1.5,
                "squareFootage": 900,
                "lotSize": 0.2,
                "yearBuilt": 1999
            },
            "financial": {
                "listPrice": 150.0,
                "monthlyRent": 4000.0,
                "pricePerSquareFoot": 0.16
            },
            "propertyType": "Cabin",
            "host": { "id": "host_9", "name": "Dana", "email": "dana@example.com" }
        })
    }

    #[test]
    fn draft_becomes_property_with_defaults() {
        let draft: PropertyDraft = serde_json::from_value(draft_json()).unwrap();
        let now = Utc::now();
        let property = draft.into_property(now).unwrap();

        assert_eq!(property.address.formatted_address, "1 Ridge Rd, Aspen, CO 81611");
        assert_eq!(property.listing_status, ListingStatus::ForRent);
        assert_eq!(property.ratings, Ratings::default());
        assert_eq!(property.availability, Availability::default());
        assert_eq!(property.created_at, now);
        assert_eq!(property.list_date, now);
    }

    #[test]
    fn draft_reports_first_missing_field() {
        let mut body = draft_json();
        body.as_object_mut().unwrap().remove("financial");
        let draft: PropertyDraft = serde_json::from_value(body).unwrap();

        let err = draft.into_property(Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("financial"));
        assert_eq!(err.to_string(), "Missing required field: financial");
    }

    #[test]
    fn empty_property_id_counts_as_missing() {
        let mut body = draft_json();
        body["propertyId"] = json!("  ");
        let draft: PropertyDraft = serde_json::from_value(body).unwrap();

        assert_eq!(
            draft.into_property(Utc::now()).unwrap_err(),
            ValidationError::MissingField("propertyId")
        );
    }

    #[test]
    fn rejects_out_of_range_attributes() {
        let mut body = draft_json();
        body["physical"]["yearBuilt"] = json!(1750);
        let draft: PropertyDraft = serde_json::from_value(body).unwrap();
        assert!(matches!(
            draft.into_property(Utc::now()),
            Err(ValidationError::Invalid(_))
        ));

        let mut body = draft_json();
        body["financial"]["listPrice"] = json!(-1.0);
        let draft: PropertyDraft = serde_json::from_value(body).unwrap();
        assert!(draft.into_property(Utc::now()).is_err());
    }

    #[test]
    fn apply_merges_present_fields_only() {
        let draft: PropertyDraft = serde_json::from_value(draft_json()).unwrap();
        let created = Utc::now() - chrono::Duration::days(1);
        let mut property = draft.into_property(created).unwrap();

        let update: PropertyUpdate = serde_json::from_value(json!({
            "financial": { "listPrice": 180.0, "monthlyRent": 4200.0, "pricePerSquareFoot": 0.2 },
            "features": ["Hot Tub"]
        }))
        .unwrap();
        let now = Utc::now();
        property.apply(update, now);

        assert_eq!(property.financial.list_price, 180.0);
        assert_eq!(property.features, vec!["Hot Tub".to_string()]);
        assert_eq!(property.address.city, "Aspen");
        assert_eq!(property.created_at, created);
        assert_eq!(property.updated_at, now);
    }

    #[test]
    fn property_type_parses_exact_names_only() {
        assert_eq!("Single Family".parse::<PropertyType>(), Ok(PropertyType::SingleFamily));
        assert_eq!("Villa".parse::<PropertyType>(), Ok(PropertyType::Villa));
        assert!("condo".parse::<PropertyType>().is_err());
        assert!("single family".parse::<PropertyType>().is_err());
        assert!("Castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn timestamps_accept_dates_and_render_fixed_width() {
        let parsed = timestamp::parse("2024-01-15").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T00:00:00+00:00");

        let value = serde_json::to_value(Review {
            user_id: "u".into(),
            rating: 5.0,
            comment: "great".into(),
            date: parsed,
        })
        .unwrap();
        assert_eq!(value["date"], "2024-01-15T00:00:00.000Z");
    }
}
