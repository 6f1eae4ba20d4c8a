use crate::breadcrumb::{self, BreadcrumbChain, BreadcrumbPolicy};
use crate::children::ChildrenSummary;
use crate::config::{ContextConfig, DEFAULT_ICON};
use crate::document::{ArchivalDocument, Level};
use crate::error::Result;
use crate::siblings::{self, SiblingWindow};

/// Derives the navigational context shown around an archival document:
/// breadcrumbs, the sibling window and the children badge.
///
/// The resolver only holds its configuration, so a single instance can be
/// shared across requests.  Every derive method is a pure function of its
/// arguments and never fails; bad input degrades to a smaller context.
#[derive(Clone, Debug)]
pub struct HierarchyContextResolver {
    config: ContextConfig,
}

impl Default for HierarchyContextResolver {
    fn default() -> Self {
        HierarchyContextResolver {
            config: ContextConfig::default(),
        }
    }
}

impl HierarchyContextResolver {
    pub fn new(config: ContextConfig) -> Result<HierarchyContextResolver> {
        config.validate()?;
        Ok(HierarchyContextResolver { config })
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn derive_breadcrumb(
        &self,
        document: &ArchivalDocument,
        policy: BreadcrumbPolicy,
    ) -> BreadcrumbChain {
        breadcrumb::derive_breadcrumb(&self.config, document, policy)
    }

    /// Plain-text breadcrumb using the configured separator and elision label.
    pub fn render_breadcrumb(&self, chain: &BreadcrumbChain) -> String {
        chain.render_text(&self.config.breadcrumb_separator, &self.config.elision_label)
    }

    pub fn derive_sibling_window(
        &self,
        document: &ArchivalDocument,
        siblings: &[ArchivalDocument],
    ) -> SiblingWindow {
        siblings::derive_sibling_window(&self.config, document, siblings)
    }

    /// Only `direct_children` is counted; grandchildren are the caller's
    /// business once the node is expanded.
    pub fn derive_children_summary(
        &self,
        document: &ArchivalDocument,
        direct_children: &[ArchivalDocument],
    ) -> ChildrenSummary {
        let count = direct_children
            .iter()
            .filter(|child| match child.parent() {
                Some(parent) => parent.identifier == document.identifier,
                // Nothing to check against, trust the caller.
                None => true,
            })
            .count();
        if count != direct_children.len() {
            warn!(
                id = %document.identifier,
                supplied = direct_children.len(),
                counted = count,
                "ignored children belonging to another parent"
            );
        }
        ChildrenSummary::from_count(count)
    }

    /// Summary from the count stored in the index, for when the children
    /// themselves have not been fetched.
    pub fn derive_children_summary_from_count(&self, document: &ArchivalDocument) -> ChildrenSummary {
        ChildrenSummary::from_count(document.child_count.unwrap_or(0))
    }

    /// Icon name for the document's level; unknown or malformed levels are
    /// classified as containers.
    pub fn document_icon(&self, document: &ArchivalDocument) -> &str {
        if document.level.is_unknown() {
            return DEFAULT_ICON;
        }
        self.config.icon_for_level(&document.level.key())
    }

    pub fn level_label(&self, level: &Level) -> String {
        match self.config.level_labels.get(&level.key()) {
            Some(label) => label.clone(),
            None if level.is_unknown() => "Container".to_string(),
            None => level.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AncestorReference;

    #[test]
    fn rejects_invalid_config() {
        let mut config = ContextConfig::default();
        config.sibling_half_width = 0;
        assert!(HierarchyContextResolver::new(config).is_err());
    }

    #[test]
    fn render_breadcrumb_uses_configured_separator() {
        let mut config = ContextConfig::default();
        config.breadcrumb_separator = " / ".to_string();
        config.elision_label = "...".to_string();
        let resolver = HierarchyContextResolver::new(config).unwrap();
        let file = ArchivalDocument::new("aoa271aspace_f", "Minutes", Level::File).with_ancestors(vec![
            AncestorReference::new("aoa271", "AOA").with_level(Level::Collection),
            AncestorReference::new("aoa271aspace_s", "Series I").with_level(Level::Series),
        ]);
        let full = resolver.derive_breadcrumb(&file, BreadcrumbPolicy::Full);
        assert_eq!(resolver.render_breadcrumb(&full), "AOA / Series I / Minutes");
        let compact = resolver.derive_breadcrumb(&file, BreadcrumbPolicy::Compact);
        assert_eq!(resolver.render_breadcrumb(&compact), "AOA / ...");
        assert_eq!(compact.to_string(), "AOA » …");
    }

    #[test]
    fn icons_fall_back_to_container() {
        let resolver = HierarchyContextResolver::default();
        let collection = ArchivalDocument::new("aoa271", "AOA", Level::Collection);
        let file = ArchivalDocument::new("aoa271a", "Minutes", Level::parse("FILE"));
        let series = ArchivalDocument::new("aoa271b", "Series I", Level::Series);
        let broken = ArchivalDocument::new("aoa271c", "???", Level::parse(""));
        assert_eq!(resolver.document_icon(&collection), "collection");
        assert_eq!(resolver.document_icon(&file), "file");
        assert_eq!(resolver.document_icon(&series), "container");
        assert_eq!(resolver.document_icon(&broken), "container");
    }

    #[test]
    fn level_labels() {
        let mut config = ContextConfig::default();
        config
            .level_labels
            .insert("otherlevel".to_string(), "Other Level".to_string());
        let resolver = HierarchyContextResolver::new(config).unwrap();
        assert_eq!(resolver.level_label(&Level::File), "File");
        assert_eq!(resolver.level_label(&Level::parse("otherlevel")), "Other Level");
        assert_eq!(resolver.level_label(&Level::parse(" ")), "Container");
    }

    #[test]
    fn children_of_other_parents_are_not_counted() {
        let resolver = HierarchyContextResolver::default();
        let series = ArchivalDocument::new("s", "Series", Level::Series)
            .with_ancestors(vec![AncestorReference::new("c", "Collection")]);
        let child = |parent: &str, id: &str| {
            ArchivalDocument::new(id, id, Level::File).with_ancestors(vec![
                AncestorReference::new("c", "Collection"),
                AncestorReference::new(parent, "Series"),
            ])
        };
        let children = vec![child("s", "a"), child("s", "b"), child("t", "x")];
        assert_eq!(
            resolver.derive_children_summary(&series, &children),
            ChildrenSummary {
                count: 2,
                expandable: true
            }
        );
        assert!(!resolver.derive_children_summary(&series, &[]).expandable);
    }

    #[test]
    fn indexed_child_count() {
        let resolver = HierarchyContextResolver::default();
        let series = ArchivalDocument::new("s", "Series", Level::Series).with_child_count(25);
        assert_eq!(
            resolver.derive_children_summary_from_count(&series).badge_label(),
            "25 children"
        );
        let leaf = ArchivalDocument::new("f", "File", Level::File);
        assert!(!resolver.derive_children_summary_from_count(&leaf).expandable);
    }
}
