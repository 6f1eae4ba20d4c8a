//! Shaping of search-engine parameters for hierarchy and grouped views, and
//! the predicates the presentation layer asks of the current search.
//!
//! The search state is optional everywhere: pages rendered outside of a search
//! (a bare show page, say) simply pass `None`.

use serde_json::{json, Map, Value};

use crate::config::ContextConfig;
use crate::links::facet_search_url;

pub type Params = Map<String, Value>;

/// "Unlimited" rows for the hierarchy view, which must show every child.
pub const HIERARCHY_MAX_ROWS: u64 = 999_999_999;
pub const HIERARCHY_SORT: &str = "_nest_path_ asc";
pub const GROUP_LIMIT: u64 = 3;

const HIERARCHY_VIEW: &str = "hierarchy";
const ONLINE_CONTENTS_VIEW: &str = "online_contents";

/// The user-facing parameters of the current search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub params: Params,
}

impl SearchState {
    pub fn new(params: Params) -> SearchState {
        SearchState { params }
    }

    /// Parse from a JSON object; anything else is treated as no parameters.
    pub fn from_value(value: Value) -> SearchState {
        match value {
            Value::Object(params) => SearchState { params },
            other => {
                warn!(params = %other, "search parameters are not an object, ignoring");
                SearchState::default()
            }
        }
    }

    fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }

    fn view(&self) -> Option<&str> {
        self.param_str("view")
    }

    fn in_hierarchy_view(&self) -> bool {
        self.view() == Some(HIERARCHY_VIEW)
    }

    pub fn add_hierarchy_max_rows(&self, mut solr_params: Params) -> Params {
        if self.in_hierarchy_view() {
            solr_params.insert("rows".to_string(), json!(HIERARCHY_MAX_ROWS));
        }
        solr_params
    }

    pub fn add_hierarchy_sort(&self, mut solr_params: Params) -> Params {
        match self.view() {
            Some(HIERARCHY_VIEW) | Some(ONLINE_CONTENTS_VIEW) => {
                solr_params.insert("sort".to_string(), json!(HIERARCHY_SORT));
            }
            _ => {}
        }
        solr_params
    }

    /// Highlighting is pointless when listing a whole hierarchy.
    pub fn add_highlighting(&self, mut solr_params: Params) -> Params {
        solr_params.insert("hl".to_string(), json!(!self.in_hierarchy_view()));
        solr_params
    }

    /// Group results by collection and fetch each group's collection record.
    pub fn add_grouping(&self, mut solr_params: Params) -> Params {
        if !grouped(Some(self)) {
            return solr_params;
        }
        let grouping = json!({
            "group": true,
            "group.field": "collection_ssi",
            "group.ngroups": true,
            "group.limit": GROUP_LIMIT,
            "parent.fl": "*",
            "parent.q": "{!term f=collection_sim v=$row.collection_ssi}",
            "parent.fq": "{!term f=level_sim v=\"Collection\"}",
        });
        if let Value::Object(grouping) = grouping {
            solr_params.extend(grouping);
        }
        solr_params
    }

    /// All of the above, in the order the search builder applies them.
    pub fn shape(&self, solr_params: Params) -> Params {
        let solr_params = self.add_hierarchy_max_rows(solr_params);
        let solr_params = self.add_hierarchy_sort(solr_params);
        let solr_params = self.add_highlighting(solr_params);
        self.add_grouping(solr_params)
    }

    /// The current parameters with grouping switched on.  Pagination restarts.
    pub fn search_with_group(&self) -> Params {
        let mut params = self.params.clone();
        params.insert("group".to_string(), json!("true"));
        params.remove("page");
        params
    }

    pub fn search_without_group(&self) -> Params {
        let mut params = self.params.clone();
        params.remove("group");
        params.remove("page");
        params
    }
}

fn facet_values<'a>(state: &'a SearchState, field: &str) -> Option<&'a Vec<Value>> {
    state.params.get("f")?.get(field)?.as_array()
}

/// Whether the search is restricted to collection-level records.
pub fn collection_active(state: Option<&SearchState>) -> bool {
    match state.and_then(|s| facet_values(s, "level_sim")) {
        Some(levels) => levels.len() == 1 && levels[0].as_str() == Some("Collection"),
        None => false,
    }
}

pub fn grouped(state: Option<&SearchState>) -> bool {
    state.and_then(|s| s.param_str("group")) == Some("true")
}

/// Whether the hierarchy is being rendered inside a component page rather
/// than a collection page.
pub fn hierarchy_component_context(state: Option<&SearchState>) -> bool {
    state.and_then(|s| s.param_str("hierarchy_context")) == Some("component")
}

/// Restrict `search` to a single collection.  Replaces any existing facet
/// constraints.
pub fn search_within_collection(collection_name: &str, search: &Params) -> Params {
    let mut params = search.clone();
    params.insert(
        "f".to_string(),
        json!({ "collection_sim": [collection_name] }),
    );
    params
}

/// Search URL listing the collections held by a repository.
pub fn repository_collections_url(config: &ContextConfig, repository_name: &str) -> String {
    facet_search_url(
        config,
        &[("repository_sim", repository_name), ("level_sim", "Collection")],
    )
}

/// The repository the search is faceted on, if exactly one is selected.
pub fn repository_faceted_on(state: Option<&SearchState>) -> Option<&str> {
    let repos = state.and_then(|s| facet_values(s, "repository_sim"))?;
    match repos.as_slice() {
        [only] => only.as_str(),
        _ => None,
    }
}
