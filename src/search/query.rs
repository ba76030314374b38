//! Source-neutral predicate built from a [`FilterSpec`].
//!
//! Each clause constrains one property field. Adapters render the same
//! predicate into their own query language: a BSON filter document for
//! the document store, or an in-process check via [`Predicate::matches`].

use crate::models::{Property, PropertyType};
use crate::search::FilterSpec;

/// Searchable property field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    City,
    State,
    PropertyType,
    ListPrice,
    Bedrooms,
    Bathrooms,
}

impl Field {
    /// Dotted document path of the field
    pub fn path(&self) -> &'static str {
        match self {
            Field::City => "address.city",
            Field::State => "address.state",
            Field::PropertyType => "propertyType",
            Field::ListPrice => "financial.listPrice",
            Field::Bedrooms => "physical.bedrooms",
            Field::Bathrooms => "physical.bathrooms",
        }
    }

    fn text<'a>(&self, property: &'a Property) -> Option<&'a str> {
        match self {
            Field::City => Some(&property.address.city),
            Field::State => Some(&property.address.state),
            Field::PropertyType => Some(property.property_type.as_str()),
            _ => None,
        }
    }

    fn number(&self, property: &Property) -> Option<f64> {
        match self {
            Field::ListPrice => Some(property.financial.list_price),
            Field::Bedrooms => Some(f64::from(property.physical.bedrooms)),
            Field::Bathrooms => Some(property.physical.bathrooms),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Case-insensitive substring match
    Contains { field: Field, needle: String },
    /// Exact match
    Equals { field: Field, value: String },
    /// Inclusive numeric bounds, either of which may be open
    Range {
        field: Field,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl Clause {
    fn matches(&self, property: &Property) -> bool {
        match self {
            Clause::Contains { field, needle } => field
                .text(property)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
            Clause::Equals { field, value } => field.text(property) == Some(value.as_str()),
            Clause::Range { field, min, max } => field.number(property).is_some_and(|n| {
                min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)
            }),
        }
    }
}

/// Conjunction of clauses. An empty predicate matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn from_filter(filter: &FilterSpec) -> Self {
        let mut clauses = Vec::new();

        if let Some(city) = &filter.city {
            clauses.push(Clause::Contains {
                field: Field::City,
                needle: city.clone(),
            });
        }
        if let Some(state) = &filter.state {
            clauses.push(Clause::Contains {
                field: Field::State,
                needle: state.clone(),
            });
        }
        if let Some(property_type) = filter.property_type {
            clauses.push(equals_type(property_type));
        }
        if filter.min_price.is_some() || filter.max_price.is_some() {
            clauses.push(Clause::Range {
                field: Field::ListPrice,
                min: filter.min_price,
                max: filter.max_price,
            });
        }
        if let Some(bedrooms) = filter.bedrooms {
            clauses.push(Clause::Range {
                field: Field::Bedrooms,
                min: Some(f64::from(bedrooms)),
                max: None,
            });
        }
        if let Some(bathrooms) = filter.bathrooms {
            clauses.push(Clause::Range {
                field: Field::Bathrooms,
                min: Some(bathrooms),
                max: None,
            });
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.clauses.iter().all(|clause| clause.matches(property))
    }
}

fn equals_type(property_type: PropertyType) -> Clause {
    Clause::Equals {
        field: Field::PropertyType,
        value: property_type.as_str().to_string(),
    }
}

/// Newest-listed first
pub fn sort_newest_first(properties: &mut [Property]) {
    properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
