use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::catalog::AffiliateSettings;
use crate::commerce::webhook::DEFAULT_TOLERANCE_SECS;

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_AMAZON_ASSOC_TAG: &str = "acme-20";
pub const DEFAULT_AMAZON_LOCALE: &str = "US";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the storefront.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub payments: PaymentsConfig,
    pub vendors: VendorCredentials,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &optional("APP_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let host = optional("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = optional("APP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = optional("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let webhook_tolerance_secs = match optional("STRIPE_WEBHOOK_TOLERANCE_SECS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs >= 0)
                .ok_or(ConfigError::InvalidTolerance)?,
            None => DEFAULT_TOLERANCE_SECS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            catalog: CatalogConfig {
                path: optional("CATALOG_PATH").map(PathBuf::from),
            },
            payments: PaymentsConfig {
                secret_key: optional("STRIPE_SECRET_KEY"),
                webhook_secret: optional("STRIPE_WEBHOOK_SECRET"),
                webhook_tolerance_secs,
                api_base: optional("STRIPE_API_BASE")
                    .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            },
            vendors: VendorCredentials {
                shopify_domain: optional("SHOPIFY_DOMAIN"),
                shopify_admin_token: optional("SHOPIFY_ADMIN_TOKEN"),
                shopify_storefront_token: optional("SHOPIFY_STOREFRONT_TOKEN"),
                amazon_access_key: optional("AMAZON_ACCESS_KEY"),
                amazon_secret_key: optional("AMAZON_SECRET_KEY"),
                amazon_assoc_tag: optional("AMAZON_ASSOC_TAG")
                    .unwrap_or_else(|| DEFAULT_AMAZON_ASSOC_TAG.to_string()),
                amazon_partner_tag: optional("AMAZON_PARTNER_TAG"),
                amazon_locale: optional("AMAZON_LOCALE")
                    .unwrap_or_else(|| DEFAULT_AMAZON_LOCALE.to_string()),
                ebay_app_id: optional("EBAY_APP_ID"),
            },
        })
    }
}

/// Unset and empty variables are treated the same.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Optional CSV replacing the built-in seed catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    pub secret_key: Option<String>,
    pub webhook_secret: Option<String>,
    pub webhook_tolerance_secs: i64,
    pub api_base: String,
}

/// Partner credentials. Every field is optional so the storefront runs in affiliate-only mode.
#[derive(Debug, Clone, Default)]
pub struct VendorCredentials {
    pub shopify_domain: Option<String>,
    pub shopify_admin_token: Option<String>,
    pub shopify_storefront_token: Option<String>,
    pub amazon_access_key: Option<String>,
    pub amazon_secret_key: Option<String>,
    pub amazon_assoc_tag: String,
    pub amazon_partner_tag: Option<String>,
    pub amazon_locale: String,
    pub ebay_app_id: Option<String>,
}

impl VendorCredentials {
    /// Domain and admin token, when both are present.
    pub fn shopify_admin(&self) -> Option<(&str, &str)> {
        Some((
            self.shopify_domain.as_deref()?,
            self.shopify_admin_token.as_deref()?,
        ))
    }

    /// Associate tag and storefront domain used for generated affiliate links.
    pub fn affiliate_settings(&self) -> AffiliateSettings {
        AffiliateSettings {
            amazon_tag: Some(self.amazon_assoc_tag.clone()),
            shopify_domain: self.shopify_domain.clone(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTolerance,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTolerance => write!(
                f,
                "STRIPE_WEBHOOK_TOLERANCE_SECS must be a non-negative number of seconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTolerance => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
