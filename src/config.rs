use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContextError, Result};
use crate::fields::FieldConfig;

/// Compact breadcrumbs never hold more than this many crumbs: the root and the
/// collection.
pub const MAX_COMPACT_DEPTH: usize = 2;

pub const MAX_SIBLING_HALF_WIDTH: usize = 10_000;

pub const DEFAULT_ICON: &str = "container";

/// Settings for `HierarchyContextResolver`.  Every field has a default so an
/// empty TOML/JSON document is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// How many crumbs the compact breadcrumb keeps before the elision
    /// marker.  Must be 1 (root only) or 2 (root and collection).
    pub compact_depth: usize,
    /// How many siblings to show on either side of the current document.
    /// Capped at `MAX_SIBLING_HALF_WIDTH`.
    pub sibling_half_width: usize,
    /// Icon names keyed by lowercased level.  Levels not listed here get
    /// `DEFAULT_ICON`.
    pub level_icons: BTreeMap<String, String>,
    /// Optional display labels keyed by lowercased level, e.g. "subseries" ->
    /// "Subseries".
    pub level_labels: BTreeMap<String, String>,
    pub breadcrumb_separator: String,
    pub elision_label: String,
    /// Prepend a repository crumb to full and compact breadcrumbs.
    pub include_repository: bool,
    /// Repository display name -> URL slug.  Repositories without a slug are
    /// rendered without a link.
    pub repositories: BTreeMap<String, String>,
    pub document_path_prefix: String,
    pub repository_path_prefix: String,
    pub search_path: String,
    /// Metadata blocks and the fields that make them up, keyed by
    /// `FieldKind::config_key()`.
    pub fields: BTreeMap<String, Vec<FieldConfig>>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        let mut level_icons = BTreeMap::new();
        level_icons.insert("collection".to_string(), "collection".to_string());
        level_icons.insert("file".to_string(), "file".to_string());

        ContextConfig {
            compact_depth: MAX_COMPACT_DEPTH,
            sibling_half_width: 2,
            level_icons,
            level_labels: BTreeMap::new(),
            breadcrumb_separator: " » ".to_string(),
            elision_label: "…".to_string(),
            include_repository: false,
            repositories: BTreeMap::new(),
            document_path_prefix: "/catalog".to_string(),
            repository_path_prefix: "/repositories".to_string(),
            search_path: "/catalog".to_string(),
            fields: BTreeMap::new(),
        }
    }
}

impl ContextConfig {
    pub fn from_toml_str(s: &str) -> Result<ContextConfig> {
        let config: ContextConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<ContextConfig> {
        let config: ContextConfig = serde_json::from_str(s).map_err(|err| {
            ContextError::bad_config(err.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, picking the format from the extension: `.json` is
    /// parsed as JSON, everything else as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ContextConfig> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        info!(path = %path.display(), is_json, "loading context config");
        if is_json {
            ContextConfig::from_json_str(&contents)
        } else {
            ContextConfig::from_toml_str(&contents)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.compact_depth == 0 || self.compact_depth > MAX_COMPACT_DEPTH {
            return Err(ContextError::bad_config(format!(
                "compact_depth must be between 1 and {}, got {}",
                MAX_COMPACT_DEPTH, self.compact_depth
            )));
        }
        if self.sibling_half_width == 0 || self.sibling_half_width > MAX_SIBLING_HALF_WIDTH {
            return Err(ContextError::bad_config(format!(
                "sibling_half_width must be between 1 and {}, got {}",
                MAX_SIBLING_HALF_WIDTH, self.sibling_half_width
            )));
        }
        if !self.document_path_prefix.starts_with('/') {
            return Err(ContextError::bad_config(format!(
                "document_path_prefix must be absolute, got {:?}",
                self.document_path_prefix
            )));
        }
        if !self.repository_path_prefix.starts_with('/') {
            return Err(ContextError::bad_config(format!(
                "repository_path_prefix must be absolute, got {:?}",
                self.repository_path_prefix
            )));
        }
        Ok(())
    }

    pub fn icon_for_level(&self, level_key: &str) -> &str {
        self.level_icons
            .get(level_key)
            .map(String::as_str)
            .unwrap_or(DEFAULT_ICON)
    }

    pub fn repository_slug(&self, repository: &str) -> Option<&str> {
        self.repositories
            .get(repository)
            .map(String::as_str)
            .filter(|slug| !slug.trim().is_empty())
    }
}
