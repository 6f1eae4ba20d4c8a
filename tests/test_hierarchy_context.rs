use arclight_context::{
    logging::init_logging, ArchivalDocument, BreadcrumbPolicy, ContextConfig,
    HierarchyContextResolver, SiblingWindow,
};
use serde_json::Value;

struct Aoa271 {
    collection: ArchivalDocument,
    series: ArchivalDocument,
    files: Vec<ArchivalDocument>,
}

fn parse_list(value: &Value) -> Vec<ArchivalDocument> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| ArchivalDocument::from_solr_json(doc).unwrap())
        .collect()
}

fn aoa271() -> Aoa271 {
    let fixture: Value = serde_json::from_str(include_str!("fixtures/aoa271.json")).unwrap();
    Aoa271 {
        collection: ArchivalDocument::from_solr_json(&fixture["collection"]).unwrap(),
        series: ArchivalDocument::from_solr_json(&fixture["series"]).unwrap(),
        files: parse_list(&fixture["series_children"]),
    }
}

fn resolver() -> HierarchyContextResolver {
    init_logging();
    let config = ContextConfig::from_toml_str(
        r#"
[repositories]
"National Library of Medicine. History of Medicine Division" = "nlm"
"#,
    )
    .unwrap();
    HierarchyContextResolver::new(config).unwrap()
}

/// One line per entry, `[x]` marking the highlighted one.
fn describe_window(window: &SiblingWindow) -> String {
    window
        .entries
        .iter()
        .map(|e| format!("{}{}", if e.highlighted { "[x] " } else { "[ ] " }, e.label))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn full_breadcrumb_for_series() {
    let data = aoa271();
    let chain = resolver().derive_breadcrumb(&data.series, BreadcrumbPolicy::Full);
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.entries[0].label, "Alpha Omega Alpha Archives, 1894-1992");
    assert_eq!(chain.entries[0].target.as_deref(), Some("/catalog/aoa271"));
    assert_eq!(chain.entries[1].label, "Series I: Administrative Records, 1902-1976");
    assert_eq!(chain.entries[1].target, None);
}

#[test]
fn full_breadcrumb_has_one_entry_per_ancestor_plus_self() {
    let data = aoa271();
    let resolver = resolver();
    for doc in std::iter::once(&data.collection)
        .chain(std::iter::once(&data.series))
        .chain(data.files.iter())
    {
        let chain = resolver.derive_breadcrumb(doc, BreadcrumbPolicy::Full);
        assert_eq!(chain.len(), doc.ancestors.len() + 1, "{}", doc.identifier);
        assert!(!chain.elided);
    }
}

#[test]
fn breadcrumb_policies_for_file() {
    let data = aoa271();
    let resolver = resolver();
    let file = &data.files[1];

    insta::assert_snapshot!(
        resolver.derive_breadcrumb(file, BreadcrumbPolicy::Full).to_string(),
        @"Alpha Omega Alpha Archives, 1894-1992 » Series I: Administrative Records, 1902-1976 » Statements of purpose, c.1902"
    );
    insta::assert_snapshot!(
        resolver.render_breadcrumb(&resolver.derive_breadcrumb(file, BreadcrumbPolicy::Compact)),
        @"Alpha Omega Alpha Archives, 1894-1992 » …"
    );
    insta::assert_snapshot!(
        resolver.derive_breadcrumb(file, BreadcrumbPolicy::ComponentOnly).to_string(),
        @"Series I: Administrative Records, 1902-1976"
    );

    let compact = resolver.derive_breadcrumb(file, BreadcrumbPolicy::Compact);
    assert!(compact.elided);
    assert_eq!(compact.labels(), vec!["Alpha Omega Alpha Archives, 1894-1992"]);
    assert_eq!(compact.entries[0].target.as_deref(), Some("/catalog/aoa271"));

    let series = resolver.derive_breadcrumb(&data.series, BreadcrumbPolicy::Compact);
    assert!(!series.elided);
    assert_eq!(series.len(), 1);
}

#[test]
fn compact_breadcrumb_with_repository() {
    let data = aoa271();
    let mut config = resolver().config().clone();
    config.include_repository = true;
    let resolver = HierarchyContextResolver::new(config).unwrap();

    let chain = resolver.derive_breadcrumb(&data.files[0], BreadcrumbPolicy::Compact);
    assert_eq!(chain.entries[0].target.as_deref(), Some("/repositories/nlm"));
    assert_eq!(chain.link_count(), 2);
    assert!(chain.elided);
    insta::assert_snapshot!(
        resolver.render_breadcrumb(&chain),
        @"National Library of Medicine. History of Medicine Division » Alpha Omega Alpha Archives, 1894-1992 » …"
    );
}

#[test]
fn rendered_breadcrumb_follows_config() {
    let data = aoa271();
    let mut config = resolver().config().clone();
    config.breadcrumb_separator = " > ".to_string();
    config.elision_label = "...".to_string();
    let resolver = HierarchyContextResolver::new(config).unwrap();
    let chain = resolver.derive_breadcrumb(&data.files[1], BreadcrumbPolicy::Compact);
    insta::assert_snapshot!(
        resolver.render_breadcrumb(&chain),
        @"Alpha Omega Alpha Archives, 1894-1992 > ..."
    );
}

#[test]
fn wide_sibling_window_from_config() {
    let data = aoa271();
    let config = ContextConfig::from_json_str(r#"{"sibling_half_width": 10000}"#).unwrap();
    let resolver = HierarchyContextResolver::new(config).unwrap();
    let window = resolver.derive_sibling_window(&data.files[3], &data.files);
    assert_eq!(window.len(), data.files.len());
    assert_eq!(window.highlighted, Some(3));
}

#[test]
fn collection_has_no_component_breadcrumbs() {
    let data = aoa271();
    let resolver = resolver();
    assert!(resolver
        .derive_breadcrumb(&data.collection, BreadcrumbPolicy::ComponentOnly)
        .is_empty());
    assert!(resolver
        .derive_breadcrumb(&data.series, BreadcrumbPolicy::ComponentOnly)
        .is_empty());
    let full = resolver.derive_breadcrumb(&data.collection, BreadcrumbPolicy::Full);
    assert_eq!(full.labels(), vec!["Alpha Omega Alpha Archives, 1894-1992"]);
}

#[test]
fn sibling_window_at_start() {
    let data = aoa271();
    let window = resolver().derive_sibling_window(&data.files[0], &data.files);
    assert_eq!(window.highlighted, Some(0));
    insta::assert_snapshot!(describe_window(&window), @r###"
    [x] "A brief account of the origin of the Alpha Omega Alpha Honorary Fraternity" - William W. Root, n.d.
    [ ] Statements of purpose, c.1902
    [ ] Constitution - notes on drafting of constitution, c.1902-1903
    "###);
}

#[test]
fn sibling_window_in_middle() {
    let data = aoa271();
    let window = resolver().derive_sibling_window(&data.files[3], &data.files);
    assert_eq!(window.len(), 5);
    assert_eq!(window.highlighted, Some(2));
    assert_eq!(
        window.highlighted_entry().unwrap().label,
        "Constitution and by-laws - drafts, 1902-1904"
    );
    assert_eq!(window.entries[0].label, "Statements of purpose, c.1902");
    assert_eq!(window.entries[4].label, "Financial Records");
}

#[test]
fn sibling_window_at_end() {
    let data = aoa271();
    let last = data.files.last().unwrap();
    let window = resolver().derive_sibling_window(last, &data.files);
    insta::assert_snapshot!(describe_window(&window), @r###"
    [ ] Meetings
    [ ] Financial Records
    [x] General announcements, 1909-1967
    "###);
}

#[test]
fn sibling_window_is_idempotent() {
    let data = aoa271();
    let resolver = resolver();
    let first = resolver.derive_sibling_window(&data.files[2], &data.files);
    let second = resolver.derive_sibling_window(&data.files[2], &data.files);
    assert_eq!(first, second);
    assert_eq!(
        resolver.derive_breadcrumb(&data.files[2], BreadcrumbPolicy::Full),
        resolver.derive_breadcrumb(&data.files[2], BreadcrumbPolicy::Full)
    );
}

#[test]
fn missing_target_returns_everything_unhighlighted() {
    let data = aoa271();
    let window = resolver().derive_sibling_window(&data.files[5], &data.files[..3]);
    assert_eq!(window.len(), 3);
    assert_eq!(window.highlighted, None);
    assert!(window.entries.iter().all(|e| !e.highlighted && e.target.is_some()));
}

#[test]
fn duplicate_titles_highlight_once() {
    let fixture: Value = serde_json::from_str(include_str!("fixtures/lc0100.json")).unwrap();
    let items = parse_list(&fixture["items"]);
    let window = resolver().derive_sibling_window(&items[1], &items);
    let highlighted: Vec<_> = window.entries.iter().filter(|e| e.highlighted).collect();
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].identifier, "lc0100aspace_a2");
    assert_eq!(window.entries[0].label, "Item AA201");
    assert!(!window.entries[0].highlighted);
}

#[test]
fn children_summaries() {
    let data = aoa271();
    let resolver = resolver();
    let summary = resolver.derive_children_summary(&data.series, &data.files);
    assert_eq!(summary.count, 7);
    assert!(summary.expandable);
    assert_eq!(
        resolver.derive_children_summary_from_count(&data.series).badge_label(),
        "25 children"
    );
    assert!(!resolver.derive_children_summary(&data.files[0], &[]).expandable);
}

#[test]
fn icons() {
    let data = aoa271();
    let resolver = resolver();
    assert_eq!(resolver.document_icon(&data.collection), "collection");
    assert_eq!(resolver.document_icon(&data.series), "container");
    assert_eq!(resolver.document_icon(&data.files[0]), "file");
}
