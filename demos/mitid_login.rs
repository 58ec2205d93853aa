//! Walks through a MitID login from the command line.
//!
//! ```text
//! cargo run --example mitid_login -- demos/mitid.yaml
//! cargo run --example mitid_login -- demos/mitid.yaml <authorization-code>
//! ```
//!
//! Without a code, prints the authorization URL to open in a browser. With the
//! code from the redirect, exchanges it and prints the userinfo claims.

use mitid_oidc::prelude::*;
use serde::Deserialize;
use std::fs;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
}

/// Corresponds to the YAML file passed as the first argument.
#[derive(Debug, Deserialize)]
struct LoginAppConfig {
    openid_configuration_url: String,
    client_id: String,
    signing_key: SigningKeyConfig,
    redirect_uri: String,
    scope: String,
    logging: Option<LoggingConfig>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "demos/mitid.yaml".to_string());
    let code = args.next();

    let config_str = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config file {}: {}", config_path, e))?;
    let app_config: LoginAppConfig = serde_yaml::from_str(&config_str)
        .map_err(|e| format!("Failed to parse YAML config from {}: {}", config_path, e))?;

    let log_level_str = app_config
        .logging
        .as_ref()
        .and_then(|l| l.level.as_deref())
        .unwrap_or("info");
    let env_filter = EnvFilter::try_new(log_level_str).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!("Log filter set to: {}", log_level_str);

    let signing_key = app_config.signing_key.load()?;
    println!("Client public JWKS (register this with the broker):");
    println!("{}", serde_json::to_string_pretty(&signing_key.public_jwks())?);

    let config = ConfigBuilder::new()
        .openid_configuration_url(&app_config.openid_configuration_url)?
        .client_id(app_config.client_id)
        .signing_key(signing_key)
        .build()?;
    let client = Client::discover(config).await?;

    match code {
        None => {
            let url = client.authorization_url(&app_config.redirect_uri, &app_config.scope)?;
            println!("Open this URL to log in:\n{}", url);
        }
        Some(code) => {
            let tokens = client.exchange_code(&code, &app_config.redirect_uri).await?;
            let access_token = tokens
                .access_token()
                .ok_or("token response did not contain an access_token")?;
            let userinfo = client.userinfo(access_token).await?;
            println!("{}", serde_json::to_string_pretty(&userinfo)?);
        }
    }

    Ok(())
}
