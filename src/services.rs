//! Posti service registry.
//!
//! Static table of the service codes the carrier accepts, plus the subset of
//! domestic (national) services.

pub const CARRIER_CODE: &str = "POSTI";
pub const CARRIER_DESCRIPTION: &str = "Posti Oy, Paketit ja kuljetusyksiköt";

/// Service codes
pub mod codes {
    pub const EXPRESS_PARCEL: &str = "PO2102";
    pub const STANDARD_PARCEL: &str = "PO2103"; // Postipaketti
    pub const HOME_DELIVERY: &str = "PO2104"; // Kotipaketti
    pub const SAMPLE_SHIPMENT: &str = "PO5041"; // Näytelähetys
}

/// Service code -> description
pub const SERVICES: &[(&str, &str)] = &[
    ("PO2017", "Posti - EMS"),
    ("PO2017D", "Posti - EMS DocPack"),
    ("ITKY14I", "Posti - Express Business Day pallet (Ulkomaa)"),
    ("IT14I", "Posti - Express Business Day parcel (Ulkomaa)"),
    ("PO2102", "Posti - Express-paketti"),
    ("PO2144", "Posti - Express-rahti"),
    ("PO2104", "Posti - Kotipaketti"),
    ("PO5041", "Posti - Näytelähetys"),
    ("PO2108", "Posti - Palautus"),
    ("PO2711", "Posti - Parcel Connect"),
    ("PO2718", "Posti - Parcel Return Connect"),
    ("PO2461", "Posti - Pikkupaketti"),
    ("PO2103", "Posti - Postipaketti"),
    ("ITPR", "Posti - Priority Parcel"),
    ("PO2106", "Posti - SmartPOST Viro"),
];

pub const NATIONAL_SERVICE_KEYS: &[&str] = &[
    "ITPR", "PO2102", "PO2103", "PO2104", "PO2108", "PO2144", "PO2461", "PO5041",
];

/// Look up the description of a service code.
pub fn service_description(code: &str) -> Option<&'static str> {
    SERVICES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, description)| *description)
}

pub fn is_known_service(code: &str) -> bool {
    service_description(code).is_some()
}

pub fn is_national_service(code: &str) -> bool {
    NATIONAL_SERVICE_KEYS.contains(&code)
}

/// All services, in registry order.
pub fn services() -> impl Iterator<Item = (&'static str, &'static str)> {
    SERVICES.iter().copied()
}

/// Domestic services only, in registry order.
pub fn national_services() -> impl Iterator<Item = (&'static str, &'static str)> {
    services().filter(|(code, _)| is_national_service(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_sizes() {
        assert_eq!(services().count(), 15);
        assert_eq!(national_services().count(), 8);
    }

    #[test]
    fn test_national_keys_are_registered() {
        for key in NATIONAL_SERVICE_KEYS {
            assert!(is_known_service(key), "{} missing from registry", key);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(service_description("PO2102"), Some("Posti - Express-paketti"));
        assert_eq!(service_description("PO5041"), Some("Posti - Näytelähetys"));
        assert_eq!(service_description("NOPE"), None);
        assert!(!is_national_service("PO2017"));
        assert!(is_national_service(codes::HOME_DELIVERY));
    }

    #[test]
    fn test_codes_are_unique() {
        let mut seen: Vec<&str> = services().map(|(code, _)| code).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), SERVICES.len());
    }
}
