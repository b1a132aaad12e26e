use std::env;
use std::fs;

use anyhow::{Context, Result};
use posti_rs::services::{self, CARRIER_DESCRIPTION};
use posti_rs::{ClientConfig, LocationClient, LocationQuery, ShipmentParams};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn usage(program: &str) {
    eprintln!("Usage: {} <command> [args]", program);
    eprintln!("  services [--national]        list Posti service codes");
    eprintln!("  locations [key=value ...]    query the location service");
    eprintln!("      keys: countryCode top types lat lng distance boundingBox zipCode");
    eprintln!("            locationZipCode strictZipCode city municipality pupCode partnerType");
    eprintln!("  shipment <file.json>         build a shipment request and print it");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posti_rs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("posti");
    let Some(command) = args.get(1) else {
        usage(program);
        std::process::exit(1);
    };

    match command.as_str() {
        "services" => list_services(args.iter().skip(2).any(|a| a == "--national")),
        "locations" => query_locations(&args[2..]).await?,
        "shipment" => {
            let Some(path) = args.get(2) else {
                usage(program);
                std::process::exit(1);
            };
            build_shipment(path)?;
        }
        other => {
            eprintln!("Unknown command: {}", other);
            usage(program);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn list_services(national_only: bool) {
    println!("{}", CARRIER_DESCRIPTION);
    let listed: Vec<(&str, &str)> = if national_only {
        services::national_services().collect()
    } else {
        services::services().collect()
    };
    for (code, description) in listed {
        println!("  {:<8} {}", code, description);
    }
}

async fn query_locations(args: &[String]) -> Result<()> {
    let params = args
        .iter()
        .map(|arg| {
            arg.split_once('=')
                .with_context(|| format!("Expected key=value, got '{}'", arg))
        })
        .collect::<Result<Vec<_>>>()?;
    let query = LocationQuery::from_params(params).context("Invalid location query")?;

    let client = LocationClient::with_config(ClientConfig::from_env())?;
    let locations = client
        .get_locations(&query)
        .await
        .context("Location query failed")?;

    eprintln!("Found {} location(s)", locations.len());
    println!("{}", serde_json::to_string_pretty(&locations)?);
    Ok(())
}

fn build_shipment(path: &str) -> Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let params: ShipmentParams =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path))?;
    let shipment = params.build().context("Invalid shipment")?;
    println!("{}", serde_json::to_string_pretty(&shipment)?);
    Ok(())
}
