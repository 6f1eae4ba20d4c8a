use serde::{Deserialize, Serialize};

use crate::config::ContextConfig;
use crate::document::{ArchivalDocument, Level};
use crate::links::document_url;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingEntry {
    pub identifier: String,
    pub label: String,
    pub level: Level,
    /// The highlighted entry is the current page and doesn't link to itself.
    pub target: Option<String>,
    pub highlighted: bool,
}

/// Siblings surrounding a document, in index order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingWindow {
    pub entries: Vec<SiblingEntry>,
    pub highlighted: Option<usize>,
}

impl SiblingWindow {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn highlighted_entry(&self) -> Option<&SiblingEntry> {
        self.highlighted.and_then(|ix| self.entries.get(ix))
    }
}

fn entry(config: &ContextConfig, sibling: &ArchivalDocument, highlighted: bool) -> SiblingEntry {
    SiblingEntry {
        identifier: sibling.identifier.clone(),
        label: sibling.label.clone(),
        level: sibling.level.clone(),
        target: if highlighted {
            None
        } else {
            Some(document_url(config, &sibling.identifier))
        },
        highlighted,
    }
}

/// Whether `sibling` hangs off a different parent than `document`.  Only
/// decidable when both parents are known.
fn is_cousin(document: &ArchivalDocument, sibling: &ArchivalDocument) -> bool {
    match (document.parent(), sibling.parent()) {
        (Some(ours), Some(theirs)) => ours.identifier != theirs.identifier,
        _ => false,
    }
}

/// Select up to `sibling_half_width` siblings on either side of `document`
/// from `siblings`, which is expected to already be in `_nest_path_` order.
/// The window shrinks at the ends of the list rather than wrapping or padding.
///
/// If `document` can't be found the whole list is returned without a
/// highlight.
pub fn derive_sibling_window(
    config: &ContextConfig,
    document: &ArchivalDocument,
    siblings: &[ArchivalDocument],
) -> SiblingWindow {
    let candidates: Vec<&ArchivalDocument> = siblings
        .iter()
        .filter(|s| !is_cousin(document, s))
        .collect();
    if candidates.len() != siblings.len() {
        debug!(
            id = %document.identifier,
            dropped = siblings.len() - candidates.len(),
            "dropped siblings with a different parent"
        );
    }

    let pos = match candidates
        .iter()
        .position(|s| s.identifier == document.identifier)
    {
        Some(pos) => pos,
        None => {
            warn!(
                id = %document.identifier,
                siblings = candidates.len(),
                "document missing from its own sibling list"
            );
            return SiblingWindow {
                entries: candidates.iter().map(|s| entry(config, s, false)).collect(),
                highlighted: None,
            };
        }
    };

    let half = config.sibling_half_width;
    let start = pos.saturating_sub(half);
    let end = pos.saturating_add(half).saturating_add(1).min(candidates.len());

    let mut entries = Vec::with_capacity(end - start);
    let mut highlighted = None;
    for (ix, sibling) in candidates[start..end].iter().enumerate() {
        let is_self = start + ix == pos;
        // A repeated copy of ourselves from a bad index response.
        if !is_self && sibling.identifier == document.identifier {
            continue;
        }
        if is_self {
            highlighted = Some(entries.len());
        }
        entries.push(entry(config, sibling, is_self));
    }

    SiblingWindow {
        entries,
        highlighted,
    }
}
