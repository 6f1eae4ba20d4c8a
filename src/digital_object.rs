use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A link to digitized content attached to a collection or component.  These
/// are stored in the index as serialized JSON strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalObject {
    pub label: String,
    pub href: String,
}

impl DigitalObject {
    pub fn new(label: &str, href: &str) -> DigitalObject {
        DigitalObject {
            label: label.to_string(),
            href: href.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<DigitalObject> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode every stored object, skipping entries that fail to parse.
    pub fn from_json_list(stored: &[String]) -> Vec<DigitalObject> {
        stored
            .iter()
            .filter_map(|json| match DigitalObject::from_json(json) {
                Ok(object) => Some(object),
                Err(err) => {
                    warn!(%err, "skipping malformed digital object");
                    None
                }
            })
            .collect()
    }
}
