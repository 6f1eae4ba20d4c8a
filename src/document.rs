use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ContextError, Result};

/// Level of description within a finding aid.  Anything we don't recognize is
/// kept verbatim in `Other` so that configured icons/labels can still match it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Collection,
    Series,
    Subseries,
    File,
    Item,
    Other(String),
}

impl Level {
    pub fn parse(s: &str) -> Level {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "collection" => Level::Collection,
            "series" => Level::Series,
            "subseries" | "sub-series" => Level::Subseries,
            "file" => Level::File,
            "item" => Level::Item,
            _ => Level::Other(trimmed.to_string()),
        }
    }

    /// Lowercased key used for config lookups.
    pub fn key(&self) -> String {
        match self {
            Level::Collection => "collection".to_string(),
            Level::Series => "series".to_string(),
            Level::Subseries => "subseries".to_string(),
            Level::File => "file".to_string(),
            Level::Item => "item".to_string(),
            Level::Other(s) => s.to_ascii_lowercase(),
        }
    }

    pub fn is_collection(&self) -> bool {
        *self == Level::Collection
    }

    /// A level string that was absent or blank in the index.
    pub fn is_unknown(&self) -> bool {
        match self {
            Level::Other(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<String> for Level {
    fn from(s: String) -> Level {
        Level::parse(&s)
    }
}

impl From<Level> for String {
    fn from(level: Level) -> String {
        level.to_string()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Collection => f.write_str("Collection"),
            Level::Series => f.write_str("Series"),
            Level::Subseries => f.write_str("Subseries"),
            Level::File => f.write_str("File"),
            Level::Item => f.write_str("Item"),
            Level::Other(s) => f.write_str(s),
        }
    }
}

/// EAD identifiers may contain periods which don't survive routing, so they
/// get replaced with dashes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedId(String);

impl NormalizedId {
    pub fn new(id: &str) -> NormalizedId {
        NormalizedId(id.replace('.', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorReference {
    /// Global identifier, usable directly as a link target.
    pub identifier: String,
    pub label: String,
    #[serde(default)]
    pub level: Option<Level>,
}

impl AncestorReference {
    pub fn new(identifier: &str, label: &str) -> AncestorReference {
        AncestorReference {
            identifier: identifier.to_string(),
            label: label.to_string(),
            level: None,
        }
    }

    pub fn with_level(mut self, level: Level) -> AncestorReference {
        self.level = Some(level);
        self
    }
}

/// A collection or component as returned by the search index.  Ancestors are
/// ordered root first and are never reordered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchivalDocument {
    pub identifier: String,
    pub label: String,
    pub level: Level,
    #[serde(default)]
    pub ancestors: Vec<AncestorReference>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub nest_path: Option<String>,
    /// Number of direct children according to the index, when it was stored.
    #[serde(default)]
    pub child_count: Option<usize>,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
}

// Solr field names.
const ID_FIELD: &str = "id";
const EAD_ID_FIELD: &str = "ead_ssi";
const TITLE_FIELDS: &[&str] = &["normalized_title_ssm", "title_ssm"];
const LEVEL_FIELD: &str = "level_ssm";
const PARENT_IDS_FIELD: &str = "parent_ssim";
const PARENT_LABELS_FIELD: &str = "parent_unittitles_ssm";
const PARENT_LEVELS_FIELD: &str = "parent_levels_ssm";
const REPOSITORY_FIELD: &str = "repository_ssm";
const NEST_PATH_FIELD: &str = "_nest_path_";
const CHILD_COUNT_FIELD: &str = "child_component_count_isim";

/// Solr hands back single-valued fields both as bare values and as
/// one-element arrays depending on the schema, so accept either.
fn first_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Array(values) => values.iter().find_map(|v| v.as_str().map(str::to_string)),
        _ => None,
    }
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(values)) => {
            let strings: Vec<String> = values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            if strings.len() != values.len() {
                warn!(
                    field = key,
                    skipped = values.len() - strings.len(),
                    "ignoring non-string values"
                );
            }
            strings
        }
        Some(other) => {
            warn!(field = key, value = %other, "expected a string or list of strings");
            vec![]
        }
        None => vec![],
    }
}

fn first_count(obj: &Map<String, Value>, key: &str) -> Option<usize> {
    let value = match obj.get(key)? {
        Value::Array(values) => values.first()?,
        other => other,
    };
    match value {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn global_id(ead_id: Option<&NormalizedId>, id: &str) -> String {
    match ead_id {
        Some(ead_id) if ead_id.as_str() != id => format!("{}{}", ead_id, id),
        _ => id.to_string(),
    }
}

impl ArchivalDocument {
    pub fn new(identifier: &str, label: &str, level: Level) -> ArchivalDocument {
        ArchivalDocument {
            identifier: identifier.to_string(),
            label: label.to_string(),
            level,
            ancestors: vec![],
            repository: None,
            nest_path: None,
            child_count: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_ancestors(mut self, ancestors: Vec<AncestorReference>) -> ArchivalDocument {
        self.ancestors = ancestors;
        self
    }

    pub fn with_repository(mut self, repository: &str) -> ArchivalDocument {
        self.repository = Some(repository.to_string());
        self
    }

    pub fn with_child_count(mut self, count: usize) -> ArchivalDocument {
        self.child_count = Some(count);
        self
    }

    pub fn with_field(mut self, key: &str, values: &[&str]) -> ArchivalDocument {
        self.fields.insert(
            key.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// The ancestor at position 0, if any.
    pub fn root(&self) -> Option<&AncestorReference> {
        self.ancestors.first()
    }

    pub fn parent(&self) -> Option<&AncestorReference> {
        self.ancestors.last()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.fields
            .get(key)
            .map(|values| values.iter().any(|v| !v.trim().is_empty()))
            .unwrap_or(false)
    }

    /// Build a document from a Solr record.  Only a payload that isn't a JSON
    /// object or has no `id` is an error; everything else degrades.
    pub fn from_solr_json(value: &Value) -> Result<ArchivalDocument> {
        let obj = value
            .as_object()
            .ok_or_else(|| ContextError::bad_document("expected a JSON object"))?;

        let raw_id = first_string(obj, ID_FIELD)
            .ok_or_else(|| ContextError::bad_document("document has no id"))?;
        let ead_id = first_string(obj, EAD_ID_FIELD).map(|id| NormalizedId::new(&id));

        let label = TITLE_FIELDS
            .iter()
            .find_map(|field| first_string(obj, field))
            .unwrap_or_else(|| raw_id.clone());

        let level = match first_string(obj, LEVEL_FIELD) {
            Some(level) => Level::parse(&level),
            None => {
                debug!(id = %raw_id, "document has no level");
                Level::Other(String::new())
            }
        };

        let parent_ids = string_list(obj, PARENT_IDS_FIELD);
        let parent_labels = string_list(obj, PARENT_LABELS_FIELD);
        let parent_levels = string_list(obj, PARENT_LEVELS_FIELD);
        if parent_labels.len() != parent_ids.len() {
            warn!(
                id = %raw_id,
                ids = parent_ids.len(),
                labels = parent_labels.len(),
                "parent ids and labels disagree in length"
            );
        }

        let ancestors = parent_ids
            .iter()
            .enumerate()
            .map(|(i, pid)| AncestorReference {
                identifier: global_id(ead_id.as_ref(), pid),
                label: parent_labels.get(i).cloned().unwrap_or_else(|| pid.clone()),
                level: parent_levels.get(i).map(|l| Level::parse(l)),
            })
            .collect();

        let mut fields = BTreeMap::new();
        for key in obj.keys() {
            let values = match obj.get(key) {
                Some(Value::String(s)) => vec![s.clone()],
                Some(Value::Array(values)) if values.iter().all(Value::is_string) => values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => continue,
            };
            fields.insert(key.clone(), values);
        }

        Ok(ArchivalDocument {
            // Collections are their own EAD id; components are namespaced by it.
            identifier: match &ead_id {
                Some(ead_id) if raw_id.starts_with(ead_id.as_str()) => raw_id.clone(),
                _ => global_id(ead_id.as_ref(), &raw_id),
            },
            label,
            level,
            ancestors,
            repository: first_string(obj, REPOSITORY_FIELD),
            nest_path: first_string(obj, NEST_PATH_FIELD),
            child_count: first_count(obj, CHILD_COUNT_FIELD),
            fields,
        })
    }
}
