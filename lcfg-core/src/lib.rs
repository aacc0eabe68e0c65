//! LCFG Core - Resource, Component, and Diff Engine
//!
//! Pure in-memory data model for the LCFG configuration-management system:
//! resources, tags, templates, components, component sets, the merge
//! policy, and the diff engine. No filesystem access — status file I/O,
//! export emission, and directory-level (de)serialisation live in the
//! sibling `lcfg-io` crate.

mod change;
mod component;
mod component_set;
mod context;
mod diff_component;
mod diff_profile;
mod diff_resource;
mod encoding;
mod error;
mod iter;
mod options;
mod resource;
mod tag;
mod template;

pub use change::{ChangeCode, StatusCode};
pub use component::{Component, EnvNames};
pub use component_set::ComponentSet;
pub use context::{ConstantResolver, ContextResolver};
pub use diff_component::DiffComponent;
pub use diff_profile::{quickdiff_set, DiffProfile};
pub use diff_resource::DiffResource;
pub use encoding::{decode, encode};
pub use error::{LcfgError, LcfgResult, MergeError, ValidationError};
pub use iter::{ComponentIter, ResourceIter};
pub use options::OptionFlags;
pub use resource::{canonicalize_boolean, validate_integer, Resource, ResourceType};
pub use tag::{validate_name, Tag, TagList};
pub use template::{Template, TemplatePattern};
