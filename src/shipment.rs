//! Shipment request assembly.
//!
//! [`create_shipment`] picks the receiver and parcel schemas for the chosen
//! service, wraps every part of the request in its value object and returns
//! the assembled [`Shipment`]. Nothing is sent; the shipment serializes to the
//! carrier's JSON request body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::objects::{
    Addon, Agent, ParcelVariant, Parcels, PdfConfig, Receiver, ReceiverVariant, Sender,
    SenderPartner, SenderPartners, Service,
};
use crate::services::{self, CARRIER_CODE};

/// Assembled shipment request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub sender: Sender,
    pub sender_partners: SenderPartners,
    pub receiver: Receiver,
    pub parcels: Parcels,
    pub service: Service,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_config: Option<PdfConfig>,
}

impl Shipment {
    /// Request body as JSON
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Optional parts of a shipment
#[derive(Debug, Clone, Default)]
pub struct ShipmentOptions {
    /// Pickup agent
    pub agent: Option<Value>,
    pub order_number: Option<String>,
    pub sender_reference: Option<String>,
    pub pdf_config: Option<Value>,
    /// Service addons, e.g. `{"id": "DNG", "declarant": "Firma Oy"}`
    pub addons: Vec<Value>,
}

/// Create a Posti shipment request.
///
/// `receiver` and `sender` need either a `quickId` or enough address
/// information; which fields count as enough depends on the service.
/// `parcels` lists at least the `copies` of each parcel.
///
/// ```
/// use posti_rs::{ShipmentOptions, create_shipment};
/// use serde_json::json;
///
/// let receiver = json!({
///     "name": "Anders Innovations",
///     "city": "Helsinki",
///     "country": "FI",
///     "address1": "Iso Roobertinkatu 20-22",
///     "zipcode": "00120"
/// });
/// let sender = json!({"quickId": "1"});
/// let shipment = create_shipment(
///     "12345",
///     "PO2102",
///     receiver,
///     sender,
///     vec![json!({"copies": 1})],
///     ShipmentOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(shipment.service.id, "PO2102");
/// ```
pub fn create_shipment(
    customer_number: &str,
    service_code: &str,
    receiver: Value,
    sender: Value,
    parcels: Vec<Value>,
    options: ShipmentOptions,
) -> Result<Shipment> {
    if !services::is_known_service(service_code) {
        return Err(Error::InvalidArgument(format!(
            "unknown service code '{}'",
            service_code
        )));
    }

    let agent = options.agent.filter(is_present);
    let receiver_variant = ReceiverVariant::for_service(service_code, agent.is_some());
    let parcel_variant = ParcelVariant::for_service(service_code);

    Ok(Shipment {
        sender: Sender::new(sender)?,
        sender_partners: SenderPartners(vec![SenderPartner {
            id: CARRIER_CODE.to_string(),
            cust_no: customer_number.to_string(),
        }]),
        receiver: Receiver::new(receiver, receiver_variant)?,
        parcels: Parcels::new(parcels, parcel_variant)?,
        service: build_service(service_code, options.addons)?,
        agent: agent.map(Agent::new).transpose()?,
        order_no: options.order_number.filter(|s| !s.is_empty()),
        sender_reference: options.sender_reference.filter(|s| !s.is_empty()),
        pdf_config: options
            .pdf_config
            .filter(is_present)
            .map(PdfConfig::new)
            .transpose()?,
    })
}

fn build_service(service_code: &str, addons: Vec<Value>) -> Result<Service> {
    let addons = addons
        .into_iter()
        .map(Addon::new)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Service::new(service_code).with_addons(addons))
}

/// Empty, zero, `false` and `null` values count as "not supplied"
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Shipment parameters as accepted by the CLI and the HTTP server
#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentParams {
    pub customer_number: String,
    pub service_code: String,
    pub receiver: Value,
    pub sender: Value,
    pub parcels: Vec<Value>,
    #[serde(default)]
    pub agent: Option<Value>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub sender_reference: Option<String>,
    #[serde(default)]
    pub pdf_config: Option<Value>,
    #[serde(default)]
    pub addons: Option<Vec<Value>>,
}

impl ShipmentParams {
    pub fn build(self) -> Result<Shipment> {
        create_shipment(
            &self.customer_number,
            &self.service_code,
            self.receiver,
            self.sender,
            self.parcels,
            ShipmentOptions {
                agent: self.agent,
                order_number: self.order_number,
                sender_reference: self.sender_reference,
                pdf_config: self.pdf_config,
                addons: self.addons.unwrap_or_default(),
            },
        )
    }
}
