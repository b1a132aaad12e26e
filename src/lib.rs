pub mod client;
pub mod config;
pub mod error;
pub mod locations;
pub mod objects;
pub mod schema;
pub mod services;
pub mod shipment;

pub use client::{LocationClient, get_locations};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use locations::{BoundingBox, LocationQuery, LocationType, Locations, PartnerType};
pub use objects::{ParcelVariant, ReceiverVariant};
pub use schema::ValidationError;
pub use shipment::{Shipment, ShipmentOptions, ShipmentParams, create_shipment};
