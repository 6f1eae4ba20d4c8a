extern crate itertools;
#[macro_use]
extern crate lazy_static;
extern crate regex;
extern crate serde;
extern crate serde_json;
extern crate toml;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;
extern crate urlencoding;

pub mod breadcrumb;
pub mod children;
pub mod config;
pub mod digital_object;
pub mod document;
pub mod error;
pub mod fields;
pub mod links;
pub mod logging;
pub mod resolver;
pub mod search_params;
pub mod siblings;

pub use breadcrumb::{BreadcrumbChain, BreadcrumbEntry, BreadcrumbPolicy, CrumbKind};
pub use children::ChildrenSummary;
pub use config::ContextConfig;
pub use document::{AncestorReference, ArchivalDocument, Level, NormalizedId};
pub use error::{ContextError, ErrorDetails, ErrorLayer, Result};
pub use resolver::HierarchyContextResolver;
pub use siblings::{SiblingEntry, SiblingWindow};
