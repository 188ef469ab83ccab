use color_eyre::eyre::WrapErr;
use log::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use pincode_check::config::Settings;
use pincode_check::postal::PostalClient;
use pincode_check::record::{save_records, Record};
use pincode_check::utils;
use pincode_check::validate::Validator;

const DEMO_ADDRESSES: &[&str] = &[
    "12, 3rd Cross, Banashankari 2nd Stage, Bengaluru, Karnataka 560050",
    "45 Residency Road, Karnataka 999999",
    "No numbers here",
    "Connaught Place, New Delhi 110001, forwarded from 560050",
    "221B Baker Street, London 560050",
];

const OUT_FILE: &str = "result/validations.csv";

#[tokio::main]
async fn main() {
    if let Err(e) = install_tracing() {
        eprintln!("cannot set up error reporting: {:?}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn install_tracing() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

async fn run() -> color_eyre::Result<()> {
    let settings = Settings::from_env()?;
    let client = PostalClient::new(&settings).wrap_err("cannot build the lookup client")?;
    let validator = Validator::new(client);

    match std::env::args().nth(1) {
        None => {
            for address in DEMO_ADDRESSES {
                let result = validator.validate(address).await;
                println!("{} => {}", address, result);
            }
        }
        Some(path) => {
            let addresses = utils::read_addresses(&path)?;
            info!("validating [{}] addresses from [{}]", addresses.len(), path);

            let results = validator.validate_all(addresses, settings.concurrency).await;
            for (address, result) in &results {
                println!("{} => {}", address, result);
            }
            let valid = results.iter().filter(|(_, result)| result.is_valid()).count();
            info!("[{}/{}] addresses have a matching PIN code", valid, results.len());

            let records = results.into_iter()
                .map(|(address, result)| Record::from_address_and_result(address, &result))
                .collect::<Vec<_>>();
            info!("saving records to [{}]", OUT_FILE);
            save_records(&records, OUT_FILE)?;
        }
    }
    Ok(())
}
