//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};

use crate::road::NO_DATA;

/// One component of a reverse-geocoding result ("route", "locality", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Best-match reverse-geocoding result. `Default` is the empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

impl GeocodeResult {
    /// Long name of the first component typed `route`, if any.
    pub fn road_name(&self) -> Option<&str> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == "route"))
            .map(|c| c.long_name.as_str())
    }
}

/// A place returned by a nearby search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbyPlace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl NearbyPlace {
    pub fn new(name: impl Into<String>, types: &[&str]) -> Self {
        Self {
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Derived description of a branch's surroundings. Computed once per
/// coordinate pair and cached as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    /// Qualitative tags such as "ใกล้โรงพยาบาล", in rule order.
    pub location_type: Vec<String>,
    /// "{road} ({class})" or the no-data label.
    pub road_description: String,
    /// Top categories as "label(count)", comma separated, or the no-data label.
    pub poi_summary: String,
    /// Up to 10 unique nearby place names, first-seen order.
    #[serde(default)]
    pub nearby_places: Vec<String>,
}

impl LocationSummary {
    pub fn location_type_line(&self) -> String {
        self.location_type.join(" / ")
    }

    pub fn nearby_places_line(&self) -> String {
        if self.nearby_places.is_empty() {
            NO_DATA.to_string()
        } else {
            self.nearby_places.join(", ")
        }
    }
}
