use std::{env, num::NonZeroUsize, time::Duration};

use thiserror::Error;

use crate::clients::ArticleApiConfig;
use crate::selection::SelectionTuning;
use crate::site::registry::DEFAULT_SITE_ID;
use crate::site::{SiteError, SiteRegistry};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    site_id: String,
    site_registry_path: Option<String>,
    view_overfetch_factor: NonZeroUsize,
    view_boost_weight: f64,
    hero_primary_buffer: usize,
    article_api_base_url: Option<String>,
    article_api_key: Option<String>,
    article_api_connect_timeout: Duration,
    article_api_total_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Site(#[from] SiteError),
}

impl EngineConfig {
    /// Read engine settings from the environment. Every variable is optional.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let site_id = env::var("REGIONAL_SITE_ID").unwrap_or_else(|_| DEFAULT_SITE_ID.to_string());
        let site_registry_path = non_empty_var("REGIONAL_SITE_REGISTRY_PATH");

        // Over-fetch tunables
        let view_overfetch_factor = parse_non_zero_usize("REGIONAL_VIEW_OVERFETCH_FACTOR", 2)?;
        let view_boost_weight = parse_non_negative_f64("REGIONAL_VIEW_BOOST_WEIGHT", 0.5)?;
        let hero_primary_buffer = parse_usize("REGIONAL_HERO_PRIMARY_BUFFER", 5)?;

        // Article store REST endpoint
        let article_api_base_url = non_empty_var("ARTICLE_API_BASE_URL");
        let article_api_key = non_empty_var("ARTICLE_API_KEY");
        let article_api_connect_timeout = parse_duration_ms("ARTICLE_API_CONNECT_TIMEOUT_MS", 3000)?;
        let article_api_total_timeout = parse_duration_ms("ARTICLE_API_TOTAL_TIMEOUT_MS", 10000)?;

        Ok(Self {
            site_id,
            site_registry_path,
            view_overfetch_factor,
            view_boost_weight,
            hero_primary_buffer,
            article_api_base_url,
            article_api_key,
            article_api_connect_timeout,
            article_api_total_timeout,
        })
    }

    /// Built-in registry, or the YAML registry at `REGIONAL_SITE_REGISTRY_PATH`,
    /// with the configured site selected as current.
    ///
    /// # Errors
    /// Returns [`ConfigError::Site`] when the file is unreadable or invalid, or
    /// the configured site id is not registered.
    pub fn load_registry(&self) -> Result<SiteRegistry, ConfigError> {
        let registry = match &self.site_registry_path {
            Some(path) => SiteRegistry::from_yaml_file(path)?,
            None => SiteRegistry::builtin(),
        };
        Ok(registry.with_default(&self.site_id)?)
    }

    #[must_use]
    pub fn selection_tuning(&self) -> SelectionTuning {
        SelectionTuning {
            view_overfetch_factor: self.view_overfetch_factor.get(),
            view_boost_weight: self.view_boost_weight,
            hero_primary_buffer: self.hero_primary_buffer,
        }
    }

    /// REST store settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] when `ARTICLE_API_BASE_URL` is unset.
    pub fn article_api(&self) -> Result<ArticleApiConfig, ConfigError> {
        let base_url = self
            .article_api_base_url
            .clone()
            .ok_or(ConfigError::Missing("ARTICLE_API_BASE_URL"))?;
        Ok(ArticleApiConfig {
            base_url,
            api_key: self.article_api_key.clone(),
            connect_timeout: self.article_api_connect_timeout,
            total_timeout: self.article_api_total_timeout,
        })
    }

    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    #[must_use]
    pub fn site_registry_path(&self) -> Option<&str> {
        self.site_registry_path.as_deref()
    }

    #[must_use]
    pub fn view_overfetch_factor(&self) -> NonZeroUsize {
        self.view_overfetch_factor
    }

    #[must_use]
    pub fn view_boost_weight(&self) -> f64 {
        self.view_boost_weight
    }

    #[must_use]
    pub fn hero_primary_buffer(&self) -> usize {
        self.hero_primary_buffer
    }

    #[must_use]
    pub fn article_api_base_url(&self) -> Option<&str> {
        self.article_api_base_url.as_deref()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_non_zero_usize(name: &'static str, default: usize) -> Result<NonZeroUsize, ConfigError> {
    let parsed = parse_usize(name, default)?;
    NonZeroUsize::new(parsed).ok_or_else(|| ConfigError::Invalid {
        name,
        source: anyhow::anyhow!("must be greater than zero"),
    })
}

fn parse_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim().parse::<usize>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })
}

fn parse_duration_ms(name: &'static str, default_ms: u64) -> Result<Duration, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default_ms.to_string());
    let ms = raw.trim().parse::<u64>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })?;
    Ok(Duration::from_millis(ms))
}

fn parse_non_negative_f64(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let parsed = raw.trim().parse::<f64>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("must be a finite, non-negative number"),
        });
    }
    Ok(parsed)
}
