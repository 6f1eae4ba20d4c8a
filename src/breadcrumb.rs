use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::{ContextConfig, MAX_COMPACT_DEPTH};
use crate::document::{AncestorReference, ArchivalDocument};
use crate::links::{document_url, repository_url};

/// Which flavor of breadcrumb to derive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreadcrumbPolicy {
    /// Every ancestor linked, followed by the document itself.  Used on show
    /// pages.
    Full,
    /// The root crumb (the repository when configured, else the top ancestor)
    /// and the collection-level ancestor, followed by an elision marker when
    /// deeper ancestors are left out.  Used in ungrouped search results.
    Compact,
    /// The first ancestor below the root, plus an elision marker if there are
    /// deeper ones.  Used in results grouped by collection, where the
    /// collection is already the group heading.
    ComponentOnly,
    /// Every ancestor below the root.
    ComponentTrail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrumbKind {
    Repository,
    Ancestor,
    Current,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    pub label: String,
    /// `None` for the current document and for repositories without a
    /// configured slug.
    pub target: Option<String>,
    pub kind: CrumbKind,
}

impl BreadcrumbEntry {
    pub fn is_link(&self) -> bool {
        self.target.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbChain {
    pub entries: Vec<BreadcrumbEntry>,
    /// When true an unlinked elision marker follows the last entry.
    pub elided: bool,
}

impl BreadcrumbChain {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && !self.elided
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn link_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_link()).count()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Join the labels for logs, plain-text output and snapshot tests.
    pub fn render_text(&self, separator: &str, elision: &str) -> String {
        let mut labels = self
            .entries
            .iter()
            .map(|e| e.label.as_str())
            .chain(if self.elided { Some(elision) } else { None });
        labels.join(separator)
    }
}

/// Renders with the default separator and elision label.  Meant for logs;
/// use `HierarchyContextResolver::render_breadcrumb` for display text.
impl fmt::Display for BreadcrumbChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = ContextConfig::default();
        f.write_str(&self.render_text(&defaults.breadcrumb_separator, &defaults.elision_label))
    }
}

fn ancestor_entry(config: &ContextConfig, ancestor: &AncestorReference) -> BreadcrumbEntry {
    BreadcrumbEntry {
        label: ancestor.label.clone(),
        target: Some(document_url(config, &ancestor.identifier)),
        kind: CrumbKind::Ancestor,
    }
}

fn repository_entry(config: &ContextConfig, document: &ArchivalDocument) -> Option<BreadcrumbEntry> {
    let repository = document.repository.as_ref()?;
    let target = match config.repository_slug(repository) {
        Some(slug) => Some(repository_url(config, slug)),
        None => {
            debug!(%repository, "no slug configured, repository crumb is unlinked");
            None
        }
    };
    Some(BreadcrumbEntry {
        label: repository.clone(),
        target,
        kind: CrumbKind::Repository,
    })
}

/// Crumbs above the document, with the repository first when configured.
fn leading_entries(config: &ContextConfig, document: &ArchivalDocument) -> Vec<BreadcrumbEntry> {
    let repository = if config.include_repository {
        repository_entry(config, document)
    } else {
        None
    };
    repository
        .into_iter()
        .chain(document.ancestors.iter().map(|a| ancestor_entry(config, a)))
        .collect()
}

/// Index of the collection the document belongs to.  Ancestors without a
/// level are common in older records, and the top ancestor is always the
/// collection, so that is the fallback.
fn collection_index(ancestors: &[AncestorReference]) -> Option<usize> {
    if ancestors.is_empty() {
        return None;
    }
    let tagged = ancestors
        .iter()
        .position(|a| a.level.as_ref().map_or(false, |l| l.is_collection()));
    Some(tagged.unwrap_or(0))
}

fn compact_breadcrumb(config: &ContextConfig, document: &ArchivalDocument) -> BreadcrumbChain {
    let ancestors = &document.ancestors;
    let repository = if config.include_repository {
        repository_entry(config, document)
    } else {
        None
    };

    // Indexes of the ancestors to link: the root when there is no repository
    // crumb, then the collection unless that is the root itself.
    let mut linked = Vec::with_capacity(MAX_COMPACT_DEPTH);
    if repository.is_none() && !ancestors.is_empty() {
        linked.push(0);
    }
    if let Some(ix) = collection_index(ancestors) {
        if !linked.contains(&ix) {
            linked.push(ix);
        }
    }
    let depth = config.compact_depth.min(MAX_COMPACT_DEPTH).max(1);
    linked.truncate(depth.saturating_sub(repository.is_some() as usize));

    BreadcrumbChain {
        elided: ancestors.len() > linked.len(),
        entries: repository
            .into_iter()
            .chain(linked.iter().map(|&ix| ancestor_entry(config, &ancestors[ix])))
            .collect(),
    }
}

pub fn derive_breadcrumb(
    config: &ContextConfig,
    document: &ArchivalDocument,
    policy: BreadcrumbPolicy,
) -> BreadcrumbChain {
    match policy {
        BreadcrumbPolicy::Full => {
            let mut entries = leading_entries(config, document);
            entries.push(BreadcrumbEntry {
                label: document.label.clone(),
                target: None,
                kind: CrumbKind::Current,
            });
            BreadcrumbChain {
                entries,
                elided: false,
            }
        }
        BreadcrumbPolicy::Compact => compact_breadcrumb(config, document),
        BreadcrumbPolicy::ComponentOnly => match document.ancestors.get(1) {
            Some(first) => BreadcrumbChain {
                entries: vec![ancestor_entry(config, first)],
                elided: document.ancestors.len() > 2,
            },
            None => BreadcrumbChain::default(),
        },
        BreadcrumbPolicy::ComponentTrail => BreadcrumbChain {
            entries: document
                .ancestors
                .iter()
                .skip(1)
                .map(|a| ancestor_entry(config, a))
                .collect(),
            elided: false,
        },
    }
}
