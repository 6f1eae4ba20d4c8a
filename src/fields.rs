use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ContextConfig;
use crate::document::ArchivalDocument;

/// The metadata blocks on collection and component pages.  Each block is
/// configured as a list of `FieldConfig` under `fields.<config_key>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Summary,
    AccessAndUse,
    Background,
    Related,
    IndexedTerms,
    InPerson,
    Cite,
    Component,
    ComponentIndexedTerms,
    Terms,
}

fn default_enabled() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Solr field name, e.g. `abstract_ssm`.
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FieldConfig {
    pub fn new(key: &str) -> FieldConfig {
        FieldConfig {
            key: key.to_string(),
            label: None,
            enabled: true,
        }
    }

    pub fn with_label(mut self, label: &str) -> FieldConfig {
        self.label = Some(label.to_string());
        self
    }
}

pub struct FieldAccessor {
    pub kind: FieldKind,
    pub config_key: &'static str,
    /// Heading of the block on the show page.
    pub heading: &'static str,
    pub label: fn(Option<&FieldConfig>, &str) -> String,
    pub should_render: fn(&FieldConfig, &ArchivalDocument) -> bool,
}

static ACCESSORS: &[FieldAccessor] = &[
    FieldAccessor {
        kind: FieldKind::Summary,
        config_key: "summary",
        heading: "Summary",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::AccessAndUse,
        config_key: "access_and_use",
        heading: "Access and Use",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::Background,
        config_key: "background",
        heading: "Background",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::Related,
        config_key: "related",
        heading: "Related",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::IndexedTerms,
        config_key: "indexed_terms",
        heading: "Indexed Terms",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::InPerson,
        config_key: "in_person",
        heading: "In person",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::Cite,
        config_key: "cite",
        heading: "How to cite this collection",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::Component,
        config_key: "component",
        heading: "About this component",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::ComponentIndexedTerms,
        config_key: "component_indexed_terms",
        heading: "Indexed Terms",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
    FieldAccessor {
        kind: FieldKind::Terms,
        config_key: "terms",
        heading: "Terms & Conditions",
        label: configured_or_humanized,
        should_render: enabled_with_value,
    },
];

impl FieldKind {
    pub fn all() -> impl Iterator<Item = FieldKind> {
        ACCESSORS.iter().map(|a| a.kind)
    }

    pub fn accessor(self) -> &'static FieldAccessor {
        // The table holds one row per variant, in declaration order.
        &ACCESSORS[self as usize]
    }

    pub fn config_key(self) -> &'static str {
        self.accessor().config_key
    }
}

/// Turn a Solr field name into something presentable: `access_subjects_ssim`
/// becomes "Access subjects".
pub fn humanize_field_key(key: &str) -> String {
    lazy_static! {
        // Dynamic-field suffixes only; `box_id` and `unit_sort` are plain names.
        static ref SOLR_SUFFIX: Regex =
            Regex::new(r"_(ssm|ssim?|sim?|tesim?|tesm|isim?|ism|bsi|dtsim?)$").unwrap();
    }
    let stripped = SOLR_SUFFIX.replace(key, "");
    let spaced = stripped.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn configured_or_humanized(field: Option<&FieldConfig>, key: &str) -> String {
    match field.and_then(|f| f.label.as_ref()) {
        Some(label) => label.clone(),
        None => humanize_field_key(key),
    }
}

fn enabled_with_value(field: &FieldConfig, document: &ArchivalDocument) -> bool {
    field.enabled && document.has_value(&field.key)
}

pub fn fields_for(config: &ContextConfig, kind: FieldKind) -> &[FieldConfig] {
    config
        .fields
        .get(kind.config_key())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn field_label(config: &ContextConfig, kind: FieldKind, key: &str) -> String {
    let field = fields_for(config, kind).iter().find(|f| f.key == key);
    (kind.accessor().label)(field, key)
}

/// Label as shown in a definition list, with the trailing colon.
pub fn render_field_label(config: &ContextConfig, kind: FieldKind, key: &str) -> String {
    format!("{}:", field_label(config, kind, key))
}

pub fn should_render(kind: FieldKind, document: &ArchivalDocument, field: &FieldConfig) -> bool {
    (kind.accessor().should_render)(field, document)
}

/// Whether any field of the block would render for this document, i.e.
/// whether the block needs a heading at all.
pub fn fields_have_content(config: &ContextConfig, kind: FieldKind, document: &ArchivalDocument) -> bool {
    fields_for(config, kind)
        .iter()
        .any(|field| should_render(kind, document, field))
}
