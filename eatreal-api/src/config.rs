use std::{env, path::PathBuf};

use dotenv::dotenv;
use eatreal_model::checkout::{DiscountTable, Pricing};
use log::{info, warn};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo-16k";
const DEFAULT_PRICE_CENTS: u32 = 1499;
const DEFAULT_CURRENCY: &str = "GBP";
const DEFAULT_DISCOUNT_CODES: &str = "EATREAL20:20";
const DEFAULT_PAYPAL_ENVIRONMENT: &str = "sandbox";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug, PartialEq)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaymentConfig {
    pub client_id: Option<String>,
    pub environment: String,
    pub pricing: Pricing,
}

/// Server settings. Integrations whose settings are missing stay disabled
/// and their endpoints answer with an error instead of failing startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub port: u16,
    pub openai: Option<OpenAiConfig>,
    pub mail: Option<MailConfig>,
    pub payment: PaymentConfig,
    pub ebook_path: Option<PathBuf>,
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            let value = var(key);
            if value.is_none() {
                warn!("{} not set", key);
            }
            value
        };
        let or_default = |key: &str, default: &str| {
            var(key).unwrap_or_else(|| {
                info!("{} not set, using default: {}", key, default);
                default.to_owned()
            })
        };

        let port = var("PORT")
            .and_then(|p| {
                p.parse()
                    .map_err(|e| warn!("Invalid PORT value {}: {}", p, e))
                    .ok()
            })
            .unwrap_or(DEFAULT_PORT);

        let openai = required("OPENAI_API_KEY").map(|api_key| OpenAiConfig {
            api_key,
            base_url: or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            model: or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
        });

        let mail = match (
            required("MAIL_API_URL"),
            required("MAIL_API_KEY"),
            required("EMAIL_USERNAME"),
        ) {
            (Some(api_url), Some(api_key), Some(sender)) => Some(MailConfig {
                api_url,
                api_key,
                sender,
            }),
            _ => None,
        };

        let base_cents = var("PRODUCT_PRICE_CENTS")
            .and_then(|p| {
                p.parse()
                    .map_err(|e| warn!("Invalid PRODUCT_PRICE_CENTS value {}: {}", p, e))
                    .ok()
            })
            .unwrap_or(DEFAULT_PRICE_CENTS);
        let discounts = or_default("DISCOUNT_CODES", DEFAULT_DISCOUNT_CODES)
            .parse()
            .unwrap_or_else(|e| {
                warn!("Ignoring DISCOUNT_CODES: {}", e);
                DiscountTable::new()
            });
        let payment = PaymentConfig {
            client_id: required("PAYPAL_CLIENT_ID"),
            environment: or_default("PAYPAL_ENVIRONMENT", DEFAULT_PAYPAL_ENVIRONMENT),
            pricing: Pricing::new(
                base_cents,
                or_default("PRODUCT_CURRENCY", DEFAULT_CURRENCY),
                discounts,
            ),
        };

        Self {
            port,
            openai,
            mail,
            payment,
            ebook_path: required("EBOOK_PATH").map(PathBuf::from),
            public_url: or_default("PUBLIC_URL", DEFAULT_PUBLIC_URL)
                .trim_end_matches('/')
                .to_owned(),
        }
    }
}
