use crate::models::{
    timestamp, Address, Availability, Coordinates, Financial, Host, ListingStatus, Physical,
    Property, PropertyType, Ratings,
};
use chrono::{DateTime, Utc};

/// Built-in listings. Served by the static fallback tier and written to
/// the document store by `rental-scout seed`.
pub fn sample_properties() -> Vec<Property> {
    vec![
        Property {
            property_id: "prop_001".to_string(),
            address: address("123 Mountain View Dr", "Aspen", "CO", "81611"),
            physical: Physical {
                bedrooms: 3,
                bathrooms: 2.0,
                square_footage: 1800,
                lot_size: 0.5,
                year_built: 2010,
            },
            financial: Financial {
                list_price: 150.0,
                monthly_rent: 4500.0,
                price_per_square_foot: 0.083,
            },
            property_type: PropertyType::SingleFamily,
            listing_status: ListingStatus::ForRent,
            photos: photos(&["photo-1449824913935-59a10b8d2000", "photo-1512917774080-9991f1c4c750"]),
            description: Some("Cozy mountain cabin with stunning views of the Rockies. Perfect for nature lovers and outdoor enthusiasts.".to_string()),
            features: strings(&["Mountain View", "Fireplace", "Deck", "Garage", "Ski Storage"]),
            location: Some(Coordinates { latitude: 39.1911, longitude: -106.8175 }),
            host: host("host_001", "Sarah Johnson", "sarah@example.com"),
            amenities: strings(&["WiFi", "Kitchen", "Free Parking", "Fireplace", "Deck"]),
            rules: strings(&["No smoking", "No pets", "Quiet hours 10 PM - 8 AM"]),
            availability: Availability::default(),
            ratings: Ratings::default(),
            list_date: date("2024-01-15"),
            created_at: date("2024-01-15"),
            updated_at: date("2024-01-15"),
        },
        Property {
            property_id: "prop_002".to_string(),
            address: address("456 Beachfront Blvd", "Maui", "HI", "96753"),
            physical: Physical {
                bedrooms: 4,
                bathrooms: 3.0,
                square_footage: 2800,
                lot_size: 0.8,
                year_built: 2015,
            },
            financial: Financial {
                list_price: 300.0,
                monthly_rent: 8500.0,
                price_per_square_foot: 0.107,
            },
            property_type: PropertyType::Villa,
            listing_status: ListingStatus::ForRent,
            photos: photos(&["photo-1502672260266-1c1ef2d93688", "photo-1571896349842-33c89424de2d"]),
            description: Some("Luxurious beachfront villa with private access to pristine beaches. Enjoy stunning ocean views and tropical paradise.".to_string()),
            features: strings(&["Ocean View", "Private Beach Access", "Pool", "Outdoor Kitchen", "Garden"]),
            location: Some(Coordinates { latitude: 20.7984, longitude: -156.3319 }),
            host: host("host_002", "Mike Chen", "mike@example.com"),
            amenities: strings(&["Pool", "Beach Access", "Outdoor Kitchen", "WiFi", "Free Parking"]),
            rules: strings(&["No parties", "Respect quiet hours", "Keep beach clean"]),
            availability: Availability::default(),
            ratings: Ratings::default(),
            list_date: date("2024-01-10"),
            created_at: date("2024-01-10"),
            updated_at: date("2024-01-10"),
        },
        Property {
            property_id: "prop_003".to_string(),
            address: address("789 Urban Loft Ave", "New York", "NY", "10001"),
            physical: Physical {
                bedrooms: 2,
                bathrooms: 2.0,
                square_footage: 1200,
                lot_size: 0.1,
                year_built: 2020,
            },
            financial: Financial {
                list_price: 200.0,
                monthly_rent: 6000.0,
                price_per_square_foot: 0.167,
            },
            property_type: PropertyType::Condo,
            listing_status: ListingStatus::ForRent,
            photos: photos(&["photo-1502005229762-cf1b2da7c5d6", "photo-1560448204-e02f11c3d0e2"]),
            description: Some("Modern urban loft in the heart of Manhattan. High ceilings, exposed brick, and contemporary amenities.".to_string()),
            features: strings(&["High Ceilings", "Exposed Brick", "Balcony", "Gym Access", "Doorman"]),
            location: Some(Coordinates { latitude: 40.7505, longitude: -73.9934 }),
            host: host("host_003", "Emma Rodriguez", "emma@example.com"),
            amenities: strings(&["Gym Access", "Doorman", "Balcony", "WiFi", "Kitchen"]),
            rules: strings(&["No smoking", "Respect neighbors", "Building rules apply"]),
            availability: Availability::default(),
            ratings: Ratings::default(),
            list_date: date("2024-01-20"),
            created_at: date("2024-01-20"),
            updated_at: date("2024-01-20"),
        },
        Property {
            property_id: "prop_004".to_string(),
            address: address("321 Desert Trail", "Sedona", "AZ", "86336"),
            physical: Physical {
                bedrooms: 3,
                bathrooms: 2.0,
                square_footage: 2200,
                lot_size: 1.2,
                year_built: 2008,
            },
            financial: Financial {
                list_price: 180.0,
                monthly_rent: 5400.0,
                price_per_square_foot: 0.082,
            },
            property_type: PropertyType::SingleFamily,
            listing_status: ListingStatus::ForRent,
            photos: photos(&["photo-1518780664697-55e3ad937233", "photo-1506905925346-21bda4d32df4"]),
            description: Some("Peaceful desert oasis surrounded by red rock formations. Perfect for meditation and outdoor adventures.".to_string()),
            features: strings(&["Red Rock Views", "Desert Garden", "Patio", "Fire Pit", "Hiking Trails"]),
            location: Some(Coordinates { latitude: 34.8697, longitude: -111.7610 }),
            host: host("host_001", "Sarah Johnson", "sarah@example.com"),
            amenities: strings(&["WiFi", "Kitchen", "Patio", "Fire Pit"]),
            rules: strings(&["No smoking", "No parties"]),
            availability: Availability::default(),
            ratings: Ratings::default(),
            list_date: date("2024-01-12"),
            created_at: date("2024-01-12"),
            updated_at: date("2024-01-12"),
        },
        Property {
            property_id: "prop_005".to_string(),
            address: address("654 Lakeside Dr", "Lake Tahoe", "CA", "96150"),
            physical: Physical {
                bedrooms: 3,
                bathrooms: 2.0,
                square_footage: 1900,
                lot_size: 0.6,
                year_built: 2012,
            },
            financial: Financial {
                list_price: 220.0,
                monthly_rent: 6600.0,
                price_per_square_foot: 0.116,
            },
            property_type: PropertyType::Cottage,
            listing_status: ListingStatus::ForRent,
            photos: photos(&["photo-1441974231531-c6227db76b6e", "photo-1506905925346-21bda4d32df4"]),
            description: Some("Charming lakeside cottage with panoramic views of Lake Tahoe. Ideal for water sports and mountain activities.".to_string()),
            features: strings(&["Lake View", "Private Dock", "Deck", "Fireplace", "Boat Storage"]),
            location: Some(Coordinates { latitude: 39.0968, longitude: -120.0324 }),
            host: host("host_002", "Mike Chen", "mike@example.com"),
            amenities: strings(&["WiFi", "Kitchen", "Private Dock", "Fireplace"]),
            rules: strings(&["No pets", "Quiet hours 10 PM - 8 AM"]),
            availability: Availability::default(),
            ratings: Ratings::default(),
            list_date: date("2024-01-18"),
            created_at: date("2024-01-18"),
            updated_at: date("2024-01-18"),
        },
        Property {
            property_id: "prop_006".to_string(),
            address: address("987 Historic Row", "Charleston", "SC", "29401"),
            physical: Physical {
                bedrooms: 4,
                bathrooms: 3.0,
                square_footage: 2500,
                lot_size: 0.4,
                year_built: 1890,
            },
            financial: Financial {
                list_price: 175.0,
                monthly_rent: 5250.0,
                price_per_square_foot: 0.070,
            },
            property_type: PropertyType::Townhouse,
            listing_status: ListingStatus::ForRent,
            photos: photos(&["photo-1564013799919-ab600027ffc6", "photo-1570129477492-45c003edd2be"]),
            description: Some("Historic townhouse in the heart of Charleston. Rich in character with modern amenities and southern charm.".to_string()),
            features: strings(&["Historic Architecture", "Balcony", "Garden", "Fireplace", "Original Details"]),
            location: Some(Coordinates { latitude: 32.7765, longitude: -79.9311 }),
            host: host("host_003", "Emma Rodriguez", "emma@example.com"),
            amenities: strings(&["WiFi", "Kitchen", "Garden", "Balcony"]),
            rules: strings(&["No smoking", "Respect neighbors"]),
            availability: Availability::default(),
            ratings: Ratings::default(),
            list_date: date("2024-01-14"),
            created_at: date("2024-01-14"),
            updated_at: date("2024-01-14"),
        },
    ]
}

fn address(line1: &str, city: &str, state: &str, zip_code: &str) -> Address {
    let mut address = Address {
        line1: line1.to_string(),
        line2: None,
        city: city.to_string(),
        state: state.to_string(),
        zip_code: zip_code.to_string(),
        formatted_address: String::new(),
    };
    address.formatted_address = address.format();
    address
}

fn host(id: &str, name: &str, email: &str) -> Option<Host> {
    Some(Host {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    })
}

fn photos(ids: &[&str]) -> Vec<String> {
    ids.iter()
        .map(|id| format!("https://images.unsplash.com/{id}?w=800&h=600&fit=crop"))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(raw: &str) -> DateTime<Utc> {
    timestamp::parse(raw).unwrap_or_default()
}
