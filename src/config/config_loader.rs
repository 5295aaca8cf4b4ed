use anyhow::{Ok, Result};

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let api = super::config_model::Api {
        base_url: std::env::var("API_BASE_URL").expect("API_BASE_URL is invalid"),
        timeout_seconds: std::env::var("API_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?,
    };

    let checkout = super::config_model::Checkout {
        merchant_name: std::env::var("CHECKOUT_MERCHANT_NAME")
            .unwrap_or_else(|_| "Lifeboard".to_string()),
        merchant_description: std::env::var("CHECKOUT_MERCHANT_DESCRIPTION")
            .unwrap_or_else(|_| "Lifeboard plan upgrade".to_string()),
    };

    Ok(DotEnvyConfig { api, checkout })
}
