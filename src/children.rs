use serde::{Deserialize, Serialize};

/// Direct-children summary for a node in the collection context.  Deeper
/// levels are fetched by the caller when the node is expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildrenSummary {
    pub count: usize,
    pub expandable: bool,
}

impl ChildrenSummary {
    pub fn from_count(count: usize) -> ChildrenSummary {
        ChildrenSummary {
            count,
            expandable: count > 0,
        }
    }

    /// Text for the "number of children" badge.
    pub fn badge_label(&self) -> String {
        match self.count {
            1 => "1 child".to_string(),
            n => format!("{} children", n),
        }
    }
}

#[test]
fn test_badge_label() {
    assert_eq!(ChildrenSummary::from_count(25).badge_label(), "25 children");
    assert_eq!(ChildrenSummary::from_count(1).badge_label(), "1 child");
    assert_eq!(ChildrenSummary::from_count(0).badge_label(), "0 children");
    assert!(!ChildrenSummary::from_count(0).expandable);
}
