//! Carrier value objects.
//!
//! Each object wraps the caller's JSON and is validated against its schema at
//! construction time, so a value that exists is known to carry its required
//! fields. Serialization is transparent: the wrapped JSON goes out as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{Schema, ValidationError};
use crate::services::codes;

const POSTAL_ADDRESS: &[&str] = &["name", "city", "country", "address1", "zipcode"];
const MOBILE_CONTACT: &[&str] = &["name", "city", "country", "mobile"];
const QUICK_ID: &[&str] = &["quickId"];

pub const SENDER_SCHEMA: Schema = Schema::one_of("Sender", &[POSTAL_ADDRESS, QUICK_ID]);
pub const RECEIVER_SCHEMA: Schema = Schema::one_of("Receiver", &[POSTAL_ADDRESS, QUICK_ID]);
pub const MOBILE_RECEIVER_SCHEMA: Schema =
    Schema::one_of("MobileReceiver", &[MOBILE_CONTACT, QUICK_ID]);
pub const AGENT_SCHEMA: Schema = Schema::one_of("Agent", &[QUICK_ID, POSTAL_ADDRESS]);
pub const PARCELS_SCHEMA: Schema = Schema::items("Parcels", &["copies"]);
pub const WEIGHTED_PARCELS_SCHEMA: Schema = Schema::items("WeightedParcels", &["copies", "weight"]);
pub const ADDON_SCHEMA: Schema = Schema::one_of("Addon", &[&["id"]]);
pub const PDF_CONFIG_SCHEMA: Schema = Schema::any_object("PDFConfig");

/// Which receiver schema a shipment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiverVariant {
    /// Postal address or quick ID
    #[default]
    Base,
    /// Mobile contact instead of postal address, or quick ID
    Mobile,
}

impl ReceiverVariant {
    /// Home delivery always needs a mobile number; the standard parcel does
    /// too when it goes to a pickup agent.
    pub fn for_service(service_code: &str, has_agent: bool) -> Self {
        match service_code {
            codes::HOME_DELIVERY => Self::Mobile,
            codes::STANDARD_PARCEL if has_agent => Self::Mobile,
            _ => Self::Base,
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Base => &RECEIVER_SCHEMA,
            Self::Mobile => &MOBILE_RECEIVER_SCHEMA,
        }
    }
}

/// Which parcel schema a shipment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParcelVariant {
    #[default]
    Base,
    /// Every parcel carries a weight
    Weighted,
}

impl ParcelVariant {
    pub fn for_service(service_code: &str) -> Self {
        match service_code {
            codes::SAMPLE_SHIPMENT => Self::Weighted,
            _ => Self::Base,
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Base => &PARCELS_SCHEMA,
            Self::Weighted => &WEIGHTED_PARCELS_SCHEMA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sender(Value);

impl Sender {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        SENDER_SCHEMA.validate(&data)?;
        Ok(Self(data))
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Receiver {
    #[serde(skip)]
    variant: ReceiverVariant,
    data: Value,
}

impl Receiver {
    pub fn new(data: Value, variant: ReceiverVariant) -> Result<Self, ValidationError> {
        variant.schema().validate(&data)?;
        Ok(Self { variant, data })
    }

    pub fn variant(&self) -> ReceiverVariant {
        self.variant
    }

    pub fn as_json(&self) -> &Value {
        &self.data
    }
}

/// Pickup agent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Agent(Value);

impl Agent {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        AGENT_SCHEMA.validate(&data)?;
        Ok(Self(data))
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parcels {
    #[serde(skip)]
    variant: ParcelVariant,
    items: Vec<Value>,
}

impl Parcels {
    pub fn new(items: Vec<Value>, variant: ParcelVariant) -> Result<Self, ValidationError> {
        variant.schema().validate_items(&items)?;
        Ok(Self { variant, items })
    }

    pub fn variant(&self) -> ParcelVariant {
        self.variant
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// PDF rendering configuration, passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PdfConfig(Value);

impl PdfConfig {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        PDF_CONFIG_SCHEMA.validate(&data)?;
        Ok(Self(data))
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

/// Service addon. Only `id` is checked; other fields depend on the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Addon(Value);

impl Addon {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        ADDON_SCHEMA.validate(&data)?;
        Ok(Self(data))
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

/// Selected service with optional addons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<Addon>,
}

impl Service {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            addons: Vec::new(),
        }
    }

    pub fn with_addons(mut self, addons: Vec<Addon>) -> Self {
        self.addons = addons;
        self
    }
}

/// Carrier account the shipment is booked on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderPartner {
    pub id: String,
    #[serde(rename = "custNo")]
    pub cust_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SenderPartners(pub Vec<SenderPartner>);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> Value {
        json!({
            "name": "Anders Innovations",
            "city": "Helsinki",
            "country": "FI",
            "address1": "Iso Roobertinkatu 20-22",
            "zipcode": "00120"
        })
    }

    #[test]
    fn test_receiver_variant_selection() {
        assert_eq!(ReceiverVariant::for_service("PO2104", false), ReceiverVariant::Mobile);
        assert_eq!(ReceiverVariant::for_service("PO2104", true), ReceiverVariant::Mobile);
        assert_eq!(ReceiverVariant::for_service("PO2103", true), ReceiverVariant::Mobile);
        assert_eq!(ReceiverVariant::for_service("PO2103", false), ReceiverVariant::Base);
        assert_eq!(ReceiverVariant::for_service("PO2102", true), ReceiverVariant::Base);
    }

    #[test]
    fn test_parcel_variant_selection() {
        assert_eq!(ParcelVariant::for_service("PO5041"), ParcelVariant::Weighted);
        assert_eq!(ParcelVariant::for_service("PO2102"), ParcelVariant::Base);
    }

    #[test]
    fn test_base_receiver_accepts_address_or_quick_id() {
        assert!(Receiver::new(address(), ReceiverVariant::Base).is_ok());
        assert!(Receiver::new(json!({"quickId": "1"}), ReceiverVariant::Base).is_ok());
        assert!(Receiver::new(json!({"name": "X"}), ReceiverVariant::Base).is_err());
    }

    #[test]
    fn test_mobile_receiver_needs_mobile_not_address() {
        let mobile = json!({
            "name": "Anders Innovations",
            "city": "Helsinki",
            "country": "FI",
            "mobile": "+358401234567"
        });
        assert!(Receiver::new(mobile, ReceiverVariant::Mobile).is_ok());

        let err = Receiver::new(address(), ReceiverVariant::Mobile).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NoMatchingFieldSet { object: "MobileReceiver", .. }
        ));

        assert!(Receiver::new(json!({"quickId": "9"}), ReceiverVariant::Mobile).is_ok());
    }

    #[test]
    fn test_weighted_parcels_require_weight() {
        let parcels = vec![json!({"copies": 1})];
        assert!(Parcels::new(parcels.clone(), ParcelVariant::Base).is_ok());
        assert_eq!(
            Parcels::new(parcels, ParcelVariant::Weighted).unwrap_err(),
            ValidationError::MissingItemField {
                object: "WeightedParcels",
                index: 0,
                field: "weight",
            }
        );
    }

    #[test]
    fn test_parcels_require_copies() {
        let err = Parcels::new(vec![json!({"weight": 1.2})], ParcelVariant::Base).unwrap_err();
        assert!(matches!(err, ValidationError::MissingItemField { field: "copies", .. }));
    }

    #[test]
    fn test_addon_requires_id() {
        let addon = Addon::new(json!({"id": "DNG", "declarant": "Firma Oy"})).unwrap();
        assert_eq!(addon.id(), Some("DNG"));
        assert!(Addon::new(json!({"declarant": "Firma Oy"})).is_err());
    }

    #[test]
    fn test_service_omits_empty_addons() {
        let service = Service::new("PO2102");
        assert_eq!(serde_json::to_value(&service).unwrap(), json!({"id": "PO2102"}));

        let addon = Addon::new(json!({"id": "SPTR"})).unwrap();
        let service = Service::new("PO2102").with_addons(vec![addon]);
        assert_eq!(
            serde_json::to_value(&service).unwrap(),
            json!({"id": "PO2102", "addons": [{"id": "SPTR"}]})
        );
    }

    #[test]
    fn test_receiver_serializes_as_plain_json() {
        let receiver = Receiver::new(json!({"quickId": "1"}), ReceiverVariant::Mobile).unwrap();
        assert_eq!(serde_json::to_value(&receiver).unwrap(), json!({"quickId": "1"}));
    }

    #[test]
    fn test_sender_partner_field_names() {
        let partners = SenderPartners(vec![SenderPartner {
            id: "POSTI".to_string(),
            cust_no: "12345".to_string(),
        }]);
        assert_eq!(
            serde_json::to_value(&partners).unwrap(),
            json!([{"id": "POSTI", "custNo": "12345"}])
        );
    }

    #[test]
    fn test_pdf_config_must_be_object() {
        assert!(PdfConfig::new(json!({"target1Media": "laser-a4"})).is_ok());
        assert!(PdfConfig::new(json!("laser-a4")).is_err());
    }
}
