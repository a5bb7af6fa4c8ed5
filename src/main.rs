use std::env;
use std::process;
use std::sync::Arc;
use webmap::logger::{log, set_min_severity, LogSeverity::*};
use webmap::server::{Config, Credentials};
use webmap::session::{self, SessionOptions};
use webmap::upload::LogTransport;

const CONFIG_PATH: &str = "webmap.json";

fn load_config() -> webmap::common::Result<Config> {
    let config = Config::load_or_create(CONFIG_PATH)?;
    config.validate()?;
    Ok(config)
}

/// Identity normally issued by the map service; the dry run accepts anything
fn credentials_from_env() -> Credentials {
    Credentials {
        identifier: env::var("WEBMAP_IDENTIFIER").unwrap_or_else(|_| "demo".to_owned()),
        token: env::var("WEBMAP_TOKEN").unwrap_or_else(|_| "dry-run".to_owned()),
    }
}

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log(format!("Failed to load {}: {}", CONFIG_PATH, err), Fatal);
            process::exit(1);
        }
    };
    if let Ok(severity) = config.log_severity() {
        set_min_severity(severity);
    }
    log("Web map init".to_owned(), Info);

    let transport = Arc::new(LogTransport::new(config.url.clone()));
    match session::run(
        config,
        transport,
        credentials_from_env(),
        &SessionOptions::default(),
    )
    .await
    {
        Ok(stats) => {
            for line in stats.lines() {
                log(line, Info);
            }
        }
        Err(err) => {
            log(format!("Web map failed: {}", err), Fatal);
            process::exit(1);
        }
    }
}
