use crate::config::ContextConfig;

fn join_path(prefix: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        urlencoding::encode(segment)
    )
}

/// Link target for a document or component, keyed by its global identifier.
pub fn document_url(config: &ContextConfig, global_id: &str) -> String {
    join_path(&config.document_path_prefix, global_id)
}

pub fn repository_url(config: &ContextConfig, slug: &str) -> String {
    join_path(&config.repository_path_prefix, slug)
}

/// Build a search URL from facet constraints, Rails-style:
/// `f[repository_sim][]=Foo&f[level_sim][]=Collection`.
pub fn facet_search_url(config: &ContextConfig, facets: &[(&str, &str)]) -> String {
    if facets.is_empty() {
        return config.search_path.clone();
    }
    let query = facets
        .iter()
        .map(|(field, value)| {
            let key = format!("f[{}][]", field);
            format!("{}={}", urlencoding::encode(&key), urlencoding::encode(value))
        })
        .collect::<Vec<String>>()
        .join("&");
    format!("{}?{}", config.search_path, query)
}

#[test]
fn test_document_url_encodes_identifier() {
    let config = ContextConfig::default();
    assert_eq!(
        document_url(&config, "aoa271aspace_843e8f9f22bac69872d0802d6fffbb04"),
        "/catalog/aoa271aspace_843e8f9f22bac69872d0802d6fffbb04"
    );
    assert_eq!(document_url(&config, "a b/c"), "/catalog/a%20b%2Fc");
}

#[test]
fn test_trailing_slash_prefix() {
    let mut config = ContextConfig::default();
    config.repository_path_prefix = "/repositories/".to_string();
    assert_eq!(repository_url(&config, "nlm"), "/repositories/nlm");
}

#[test]
fn test_facet_search_url() {
    let config = ContextConfig::default();
    assert_eq!(facet_search_url(&config, &[]), "/catalog");
    assert_eq!(
        facet_search_url(&config, &[("level_sim", "Collection")]),
        "/catalog?f%5Blevel_sim%5D%5B%5D=Collection"
    );
}
