//! Location subsystem: external geocode / nearby-search clients and the
//! coordinate-keyed summary cache.

pub mod cache;
pub mod providers;
pub mod types;

pub use cache::{cache_key, EnrichmentCache};
pub use providers::{GoogleMaps, LocationProvider, DEFAULT_RADIUS_M};
pub use types::{AddressComponent, GeocodeResult, LocationSummary, NearbyPlace};
