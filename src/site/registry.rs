//! Keyed collection of site configurations.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::builtin;
use super::types::{RegionType, SiteConfig};

pub const DEFAULT_SITE_ID: &str = "naju";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("unknown site id: {0}")]
    Unknown(String),
    #[error("duplicate site id: {0}")]
    Duplicate(String),
    #[error("registry contains no sites")]
    Empty,
    #[error("invalid site {site}: {reason}")]
    Invalid { site: String, reason: String },
    #[error("failed to read site registry {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse site registry: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    default_site: Option<String>,
    sites: Vec<SiteConfig>,
}

/// Immutable map from site id to configuration, plus the id of the site
/// served by this deployment.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: BTreeMap<String, Arc<SiteConfig>>,
    default_id: String,
}

impl SiteRegistry {
    /// Registry of the built-in sites with `naju` as the current site.
    #[must_use]
    pub fn builtin() -> Self {
        let sites = builtin::sites()
            .into_iter()
            .map(|site| (site.id.clone(), Arc::new(site)))
            .collect();
        Self {
            sites,
            default_id: DEFAULT_SITE_ID.to_string(),
        }
    }

    /// Build a registry from explicit records, validating each one.
    ///
    /// # Errors
    /// Returns [`SiteError`] when a record is malformed, ids collide or
    /// `default_id` is not among the records.
    pub fn from_sites(sites: Vec<SiteConfig>, default_id: &str) -> Result<Self, SiteError> {
        if sites.is_empty() {
            return Err(SiteError::Empty);
        }
        let mut map = BTreeMap::new();
        for site in sites {
            validate(&site)?;
            if map.contains_key(&site.id) {
                return Err(SiteError::Duplicate(site.id));
            }
            map.insert(site.id.clone(), Arc::new(site));
        }
        if !map.contains_key(default_id) {
            return Err(SiteError::Unknown(default_id.to_string()));
        }
        Ok(Self {
            sites: map,
            default_id: default_id.to_string(),
        })
    }

    /// Parse a YAML registry document of the form
    /// `{ default_site: <id>?, sites: [SiteConfig...] }`.
    ///
    /// # Errors
    /// Returns [`SiteError`] on parse or validation failure.
    pub fn from_yaml_str(raw: &str) -> Result<Self, SiteError> {
        let file: RegistryFile = serde_yaml::from_str(raw)?;
        let default_id = match file.default_site {
            Some(id) => id,
            None => file
                .sites
                .first()
                .map(|site| site.id.clone())
                .ok_or(SiteError::Empty)?,
        };
        let registry = Self::from_sites(file.sites, &default_id)?;
        debug!(sites = registry.sites.len(), default_site = %registry.default_id, "parsed site registry");
        Ok(registry)
    }

    /// # Errors
    /// Returns [`SiteError::Io`] when the file cannot be read, otherwise as
    /// [`SiteRegistry::from_yaml_str`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_yaml_str(&raw)?;
        info!(path = %path.display(), sites = registry.sites.len(), "loaded site registry");
        Ok(registry)
    }

    /// Switch the current site.
    ///
    /// # Errors
    /// Returns [`SiteError::Unknown`] if `site_id` is not registered.
    pub fn with_default(mut self, site_id: &str) -> Result<Self, SiteError> {
        if !self.sites.contains_key(site_id) {
            return Err(SiteError::Unknown(site_id.to_string()));
        }
        self.default_id = site_id.to_string();
        Ok(self)
    }

    /// # Errors
    /// Returns [`SiteError::Unknown`] if `site_id` is not registered.
    pub fn try_lookup(&self, site_id: &str) -> Result<Arc<SiteConfig>, SiteError> {
        self.sites
            .get(site_id)
            .cloned()
            .ok_or_else(|| SiteError::Unknown(site_id.to_string()))
    }

    /// Look up a site that is known to exist.
    ///
    /// # Panics
    /// Panics on an unknown id: callers only pass ids from the static
    /// registry, so a miss is a deployment misconfiguration.
    #[must_use]
    pub fn lookup(&self, site_id: &str) -> Arc<SiteConfig> {
        match self.try_lookup(site_id) {
            Ok(site) => site,
            Err(error) => panic!("site registry misconfigured: {error}"),
        }
    }

    /// The site served by this deployment.
    #[must_use]
    pub fn default_site(&self) -> Arc<SiteConfig> {
        self.lookup(&self.default_id)
    }

    #[must_use]
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.sites.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SiteConfig>> {
        self.sites.values()
    }
}

fn validate(site: &SiteConfig) -> Result<(), SiteError> {
    let invalid = |reason: &str| SiteError::Invalid {
        site: site.id.clone(),
        reason: reason.to_string(),
    };

    if site.id.trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }
    if !site.weights.is_ordered() {
        return Err(invalid(
            "weights must satisfy primary >= adjacent1 >= adjacent2 >= province > 0",
        ));
    }
    if site.hero.article_count == 0 {
        return Err(invalid("hero.article_count must be positive"));
    }
    if site.hero.primary_min_count > site.hero.article_count {
        return Err(invalid("hero.primary_min_count exceeds hero.article_count"));
    }
    if site
        .group(RegionType::Primary)
        .names
        .iter()
        .all(|name| name.trim().is_empty())
    {
        return Err(invalid("primary region group needs at least one name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r"
default_site: gokseong
sites:
  - id: gokseong
    name: 곡성뉴스
    regions:
      primary:
        names: [곡성]
        slugs: [gokseong]
      adjacent1:
        names: [구례, 담양]
        slugs: [gurye, damyang]
    hero:
      article_count: 4
      primary_min_count: 2
  - id: gurye
    name: 구례뉴스
    regions:
      primary:
        names: [구례]
        slugs: [gurye]
";

    #[test]
    fn builtin_registry_has_nine_valid_sites() {
        let registry = SiteRegistry::builtin();
        assert_eq!(registry.ids().len(), 9);
        for site in registry.iter() {
            validate(site).expect("builtin site should validate");
        }
        assert_eq!(registry.default_site().id, "naju");
    }

    #[test]
    fn builtin_naju_groups() {
        let naju = SiteRegistry::builtin().lookup("naju");
        assert_eq!(naju.regions.primary.names, vec!["나주"]);
        assert!(naju.regions.adjacent1.names.contains(&"광주".to_string()));
        assert_eq!(naju.regions.province.slugs, vec!["jeonnam"]);
        assert_eq!(naju.fallback_label, "전남");
    }

    #[test]
    fn try_lookup_reports_unknown() {
        let error = SiteRegistry::builtin()
            .try_lookup("seoul")
            .expect_err("unknown id");
        assert!(matches!(error, SiteError::Unknown(id) if id == "seoul"));
    }

    #[test]
    #[should_panic(expected = "site registry misconfigured")]
    fn lookup_panics_on_unknown() {
        let _ = SiteRegistry::builtin().lookup("seoul");
    }

    #[test]
    fn yaml_registry_fills_defaults() {
        let registry = SiteRegistry::from_yaml_str(YAML).expect("yaml should parse");
        assert_eq!(registry.default_id(), "gokseong");
        let site = registry.default_site();
        assert_eq!(site.hero.primary_min_count, 2);
        assert!((site.weights.province - 0.3).abs() < f64::EPSILON);
        assert_eq!(site.fallback_label, "전남");
        assert!(registry.lookup("gurye").regions.adjacent2.names.is_empty());
    }

    #[test]
    fn yaml_registry_rejects_bad_hero() {
        let raw = YAML.replace("primary_min_count: 2", "primary_min_count: 9");
        let error = SiteRegistry::from_yaml_str(&raw).expect_err("invalid hero");
        assert!(matches!(error, SiteError::Invalid { site, .. } if site == "gokseong"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let naju = SiteRegistry::builtin().lookup("naju");
        let sites = vec![(*naju).clone(), (*naju).clone()];
        let error = SiteRegistry::from_sites(sites, "naju").expect_err("duplicate");
        assert!(matches!(error, SiteError::Duplicate(id) if id == "naju"));
    }

    #[test]
    fn with_default_requires_known_site() {
        let registry = SiteRegistry::builtin()
            .with_default("mokpo")
            .expect("mokpo exists");
        assert_eq!(registry.default_site().id, "mokpo");
        assert!(SiteRegistry::builtin().with_default("busan").is_err());
    }

    #[test]
    fn builtin_registry_survives_yaml_export() {
        #[derive(serde::Serialize)]
        struct Export<'a> {
            default_site: &'a str,
            sites: Vec<&'a SiteConfig>,
        }

        let builtin = SiteRegistry::builtin();
        let raw = serde_yaml::to_string(&Export {
            default_site: builtin.default_id(),
            sites: builtin.iter().map(|site| &**site).collect(),
        })
        .expect("builtin registry should serialize");

        let reloaded = SiteRegistry::from_yaml_str(&raw).expect("exported registry should load");
        assert_eq!(reloaded.ids(), builtin.ids());
        for site in builtin.iter() {
            assert_eq!(*reloaded.lookup(&site.id), **site);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let error = SiteRegistry::from_yaml_file("/nonexistent/sites.yaml").expect_err("io");
        assert!(matches!(error, SiteError::Io { .. }));
    }
}
