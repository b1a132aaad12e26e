/// Example HTTP client demonstrating how to call the Posti HTTP server API
///
/// Run the server first:
/// ```bash
/// cargo run --bin server
/// ```
///
/// Then run this example:
/// ```bash
/// cargo run --example api_client
/// ```

use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize, Debug)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Deserialize, Debug)]
struct ServicesResponse {
    carrier: String,
    data: Vec<ServiceData>,
}

#[derive(Deserialize, Debug)]
struct ServiceData {
    code: String,
    description: String,
    national: bool,
}

#[derive(Deserialize, Debug)]
struct LocationsResponse {
    count: usize,
    data: Vec<Value>,
}

#[derive(Deserialize, Debug)]
struct ShipmentResponse {
    data: Value,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let client = reqwest::Client::new();

    println!("=== Posti HTTP API Client Demo ===\n");

    // 1. Health Check
    println!("1. Checking server health...");
    let health: HealthResponse = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json()
        .await?;
    println!("   Server status: {}", health.status);
    println!("   Version: {}\n", health.version);

    // 2. Domestic services
    println!("2. Listing national services...");
    let services: ServicesResponse = client
        .get(format!("{}/api/services", base_url))
        .query(&[("national", "true")])
        .send()
        .await?
        .json()
        .await?;
    println!("   Carrier: {}", services.carrier);
    for service in &services.data {
        let scope = if service.national { "national" } else { "international" };
        println!("   {:<8} {} ({})", service.code, service.description, scope);
    }
    println!();

    // 3. Nearest pickup points
    println!("3. Finding pickup points near Helsinki...");
    let response = client
        .get(format!("{}/api/locations", base_url))
        .query(&[
            ("lat", "60.1699"),
            ("lng", "24.9384"),
            ("top", "3"),
            ("types", "POSTOFFICE,LOCKER"),
        ])
        .send()
        .await?;
    if response.status().is_success() {
        let result: LocationsResponse = response.json().await?;
        println!("   Found {} location(s)", result.count);
        for (i, location) in result.data.iter().enumerate() {
            println!(
                "   [{}] {}",
                i + 1,
                location
                    .get("pupCode")
                    .and_then(Value::as_str)
                    .unwrap_or("N/A")
            );
        }
        println!();
    } else {
        println!("   Error: {}\n", response.text().await?);
    }

    // 4. Build a shipment
    println!("4. Building a home delivery shipment...");
    let request = json!({
        "customer_number": "12345",
        "service_code": "PO2104",
        "receiver": {
            "name": "Anders Innovations",
            "city": "Helsinki",
            "country": "FI",
            "mobile": "+358401234567"
        },
        "sender": {"quickId": "1"},
        "parcels": [{"copies": 1}],
        "addons": [{"id": "SPTR"}]
    });
    let response = client
        .post(format!("{}/api/shipments", base_url))
        .json(&request)
        .send()
        .await?;
    if response.status().is_success() {
        let result: ShipmentResponse = response.json().await?;
        println!("{}\n", serde_json::to_string_pretty(&result.data)?);
    } else {
        println!("   Error: {}\n", response.text().await?);
    }

    println!("=== Demo Complete ===");

    Ok(())
}
