use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use caller_logging::{caller_info, caller_warn, level_from_name};
use physinv_app::{logging, read_sdc, CallerConfig};
use physinv_caller::{ApiCaller, LogEventSink, ReqwestRequestClient};

const DEFAULT_INPUT: &str = "./Inputs/SDC_Physical_Inventory_Document_Header_sample.json";
const DEFAULT_CONFIG: &str = "./caller.ron";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string()));
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string()));

    let config =
        CallerConfig::load(&config_path)?.with_env_overrides(|name| std::env::var(name).ok());
    config.validate()?;
    logging::initialize(
        config.log_destination,
        level_from_name(&config.log_level),
        &config.log_file,
    );

    let sdc = read_sdc(&input_path)?;
    let key = sdc.request_key();
    caller_info!(
        "Fetching physical inventory document {} ({}) item {} accepter={:?}",
        key.document_id,
        key.fiscal_year,
        key.item_id,
        sdc.accepter
    );

    let client = ReqwestRequestClient::new(config.request_settings())
        .context("failed to build request client")?;
    let caller = ApiCaller::new(
        config.base_url.clone(),
        Arc::new(client),
        Arc::new(LogEventSink),
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let summary = runtime.block_on(caller.async_fetch(&key, sdc.accepter.as_slice()));

    caller_info!(
        "Fetch finished: launched={} completed={} failed={} ignored={}",
        summary.launched(),
        summary.completed(),
        summary.failed(),
        summary.ignored()
    );
    if summary.ignored() > 0 {
        caller_warn!("Ignored {} unrecognized accepter value(s)", summary.ignored());
    }
    Ok(())
}
