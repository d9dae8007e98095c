use log::debug;
use reqwest::Url;

use crate::clients::{
    CatalogClient,
    errors::{Error, Result},
};

pub const BASE_URL_ENV: &str = "SONGBOOK_API_BASE";
pub const DEFAULT_BASE_URL: &str = "https://fsa-async-await.herokuapp.com/api/guided-practice";

// Resolved settings for talking to the catalog
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
}

impl Config {
    pub fn client(&self) -> Result<CatalogClient> {
        CatalogClient::try_new(self.base_url.clone())
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    base_url: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self { base_url: None }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    // Builder value first, then the environment, then the public default
    pub fn build(self) -> Result<Config> {
        let raw = match self.base_url {
            Some(url) => url,
            None => match std::env::var(BASE_URL_ENV) {
                Ok(url) => url,
                Err(std::env::VarError::NotPresent) => DEFAULT_BASE_URL.to_string(),
                Err(e) => return Err(e.into()),
            },
        };
        let base_url = parse_base_url(&raw)?;
        debug!("Using catalog API at {base_url}");
        Ok(Config { base_url })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| Error::ConfigurationError(format!("invalid base URL {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::ConfigurationError(format!(
            "base URL must be http or https, got {other}"
        ))),
    }
}
