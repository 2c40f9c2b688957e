//! Logs in to a BIND9 API server, lists its zones, and optionally the records
//! of one zone.
//!
//! ```text
//! RUST_LOG=debug cargo run --example client_example -- http://localhost:7650 example.com
//! ```

use std::env;
use std::process::ExitCode;

use bind9_api::{Client, ClientError};
use log::info;

fn run(base_url: &str, zone: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new(base_url)?;

    client.login("admin", "password123")?;

    let zones = client.get_zones()?;
    println!("Zones:\n{zones:#}");

    if let Some(zone) = zone {
        let records = client.get_records(zone)?;
        println!("Records in {zone}:\n{records:#}");
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:7650".to_string());
    let zone = args.next();

    info!("using API at {base_url}");
    match run(&base_url, zone.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(ClientError::Authentication(_)) = e.downcast_ref::<ClientError>() {
                eprintln!("Check the credentials used for logging in.");
            }
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
