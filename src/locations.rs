//! Location service query and result types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Location types understood by the location service.
///
/// Values outside the documented list are kept in `Other` and sent as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationType {
    PostOffice,
    LetterBox,
    SmartPost,
    PickupPoint,
    BusinessService,
    PoBox,
    Locker,
    Other(String),
}

impl LocationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PostOffice => "POSTOFFICE",
            Self::LetterBox => "LETTERBOX",
            Self::SmartPost => "SMARTPOST",
            Self::PickupPoint => "PICKUPPOINT",
            Self::BusinessService => "BUSINESSSERVICE",
            Self::PoBox => "POBOX",
            Self::Locker => "LOCKER",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LocationType {
    fn from(s: &str) -> Self {
        let s = s.trim();
        match s.to_ascii_uppercase().as_str() {
            "POSTOFFICE" => Self::PostOffice,
            "LETTERBOX" => Self::LetterBox,
            "SMARTPOST" => Self::SmartPost,
            "PICKUPPOINT" => Self::PickupPoint,
            "BUSINESSSERVICE" => Self::BusinessService,
            "POBOX" => Self::PoBox,
            "LOCKER" => Self::Locker,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl FromStr for LocationType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(Self::from(s))
    }
}

/// Partner networks the location service can filter on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartnerType {
    Posti,
    Aibe,
    Boxnet,
    TopoCentras,
    Other(String),
}

impl PartnerType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Posti => "POSTI",
            Self::Aibe => "AIBE",
            Self::Boxnet => "BOXNET",
            Self::TopoCentras => "TOPO_CENTRAS",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PartnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PartnerType {
    fn from(s: &str) -> Self {
        let s = s.trim();
        match s.to_ascii_uppercase().as_str() {
            "POSTI" => Self::Posti,
            "AIBE" => Self::Aibe,
            "BOXNET" => Self::Boxnet,
            "TOPO_CENTRAS" => Self::TopoCentras,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl FromStr for PartnerType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(Self::from(s))
    }
}

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top_left_lat: f64,
    pub top_left_lng: f64,
    pub bottom_right_lat: f64,
    pub bottom_right_lng: f64,
}

/// `[topLeftLat, topLeftLng, bottomRightLat, bottomRightLng]`
impl From<[f64; 4]> for BoundingBox {
    fn from([top_left_lat, top_left_lng, bottom_right_lat, bottom_right_lng]: [f64; 4]) -> Self {
        Self {
            top_left_lat,
            top_left_lng,
            bottom_right_lat,
            bottom_right_lng,
        }
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parse `"topLeftLat,topLeftLng,bottomRightLat,bottomRightLng"`
    fn from_str(s: &str) -> Result<Self> {
        let coords = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidArgument(format!("bounding box '{}': {}", s, e)))?;
        let coords: [f64; 4] = coords.try_into().map_err(|_| {
            Error::InvalidArgument(format!("bounding box '{}' needs exactly 4 coordinates", s))
        })?;
        Ok(coords.into())
    }
}

/// Filters for a location lookup. Every field is optional; the remote
/// service decides which combinations make sense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    /// Defaults to FI on the remote side
    pub country_code: Option<String>,
    /// Number of closest locations to return
    pub top: Option<u32>,
    pub types: Option<Vec<LocationType>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Max distance from latitude/longitude
    pub distance: Option<f64>,
    pub bounding_box: Option<BoundingBox>,
    pub zipcode: Option<String>,
    /// Find the closest pickup points to this zipcode
    pub location_zipcode: Option<String>,
    /// Only exact zipcode matches. `false` is the remote default and is never sent.
    pub strict_zip_code: Option<bool>,
    pub city: Option<String>,
    pub municipality: Option<String>,
    pub pup_code: Option<String>,
    pub partner_type: Option<PartnerType>,
}

impl LocationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn types(mut self, types: impl IntoIterator<Item = LocationType>) -> Self {
        self.types = Some(types.into_iter().collect());
        self
    }

    pub fn near(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn bounding_box(mut self, bounding_box: impl Into<BoundingBox>) -> Self {
        self.bounding_box = Some(bounding_box.into());
        self
    }

    pub fn zipcode(mut self, zipcode: impl Into<String>) -> Self {
        self.zipcode = Some(zipcode.into());
        self
    }

    pub fn location_zipcode(mut self, zipcode: impl Into<String>) -> Self {
        self.location_zipcode = Some(zipcode.into());
        self
    }

    pub fn strict_zip_code(mut self, strict: bool) -> Self {
        self.strict_zip_code = Some(strict);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    pub fn pup_code(mut self, pup_code: impl Into<String>) -> Self {
        self.pup_code = Some(pup_code.into());
        self
    }

    pub fn partner_type(mut self, partner_type: PartnerType) -> Self {
        self.partner_type = Some(partner_type);
        self
    }

    /// Build a query from remote-style parameter names.
    ///
    /// `types` is comma separated and may repeat; `boundingBox` takes four
    /// comma separated coordinates. Used by the CLI and the HTTP server.
    pub fn from_params<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut query = Self::default();
        for (key, value) in params {
            match key {
                "countryCode" => query.country_code = Some(value.to_string()),
                "top" => query.top = Some(parse_value(key, value)?),
                "types" => {
                    let types = query.types.get_or_insert_with(Vec::new);
                    for part in value.split(',').filter(|p| !p.trim().is_empty()) {
                        types.push(LocationType::from(part));
                    }
                }
                "lat" => query.latitude = Some(parse_value(key, value)?),
                "lng" => query.longitude = Some(parse_value(key, value)?),
                "distance" => query.distance = Some(parse_value(key, value)?),
                "boundingBox" => query.bounding_box = Some(value.parse()?),
                "zipCode" => query.zipcode = Some(value.to_string()),
                "locationZipCode" => query.location_zipcode = Some(value.to_string()),
                "strictZipCode" => query.strict_zip_code = Some(parse_value(key, value)?),
                "city" => query.city = Some(value.to_string()),
                "municipality" => query.municipality = Some(value.to_string()),
                "pupCode" => query.pup_code = Some(value.to_string()),
                "partnerType" => query.partner_type = Some(PartnerType::from(value)),
                other => {
                    return Err(Error::InvalidArgument(format!(
                        "unknown location parameter '{}'",
                        other
                    )));
                }
            }
        }
        Ok(query)
    }

    /// Query parameters sent to the location service, in a stable order.
    /// Absent filters produce no parameter at all.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(country_code) = &self.country_code {
            pairs.push(("countryCode", country_code.clone()));
        }
        if let Some(top) = self.top {
            pairs.push(("top", top.to_string()));
        }
        if let Some(types) = &self.types {
            pairs.extend(types.iter().map(|t| ("types", t.to_string())));
        }
        if let Some(latitude) = self.latitude {
            pairs.push(("lat", format_float(latitude)));
        }
        if let Some(longitude) = self.longitude {
            pairs.push(("lng", format_float(longitude)));
        }
        if let Some(distance) = self.distance {
            pairs.push(("distance", format_float(distance)));
        }
        if let Some(zipcode) = &self.zipcode {
            pairs.push(("zipCode", zipcode.clone()));
        }
        if let Some(location_zipcode) = &self.location_zipcode {
            pairs.push(("locationZipCode", location_zipcode.clone()));
        }
        if self.strict_zip_code == Some(true) {
            pairs.push(("strictZipCode", "true".to_string()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(municipality) = &self.municipality {
            pairs.push(("municipality", municipality.clone()));
        }
        if let Some(pup_code) = &self.pup_code {
            pairs.push(("pupCode", pup_code.clone()));
        }
        if let Some(partner_type) = &self.partner_type {
            pairs.push(("partnerType", partner_type.to_string()));
        }
        if let Some(bbox) = &self.bounding_box {
            pairs.push(("topLeftLat", format_float(bbox.top_left_lat)));
            pairs.push(("topLeftLng", format_float(bbox.top_left_lng)));
            pairs.push(("bottomRightLat", format_float(bbox.bottom_right_lat)));
            pairs.push(("bottomRightLng", format_float(bbox.bottom_right_lng)));
        }

        pairs
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::InvalidArgument(format!("{}='{}': {}", key, value, e)))
}

/// Whole numbers keep a trailing ".0" so coordinates read as decimals.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Location records in the order the service returned them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locations(Vec<Value>);

impl Locations {
    /// Extract the `locations` list from a location service response body.
    pub fn from_response(body: Value) -> Result<Self> {
        let Value::Object(mut fields) = body else {
            return Err(Error::UnexpectedResponse(
                "response body is not a JSON object".to_string(),
            ));
        };
        match fields.remove("locations") {
            Some(Value::Array(records)) => Ok(Self(records)),
            Some(other) => Err(Error::UnexpectedResponse(format!(
                "'locations' is not a list: {}",
                other
            ))),
            None => Err(Error::UnexpectedResponse(
                "response has no 'locations' field".to_string(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl IntoIterator for Locations {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Locations {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
