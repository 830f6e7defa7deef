//! Hierarchical role/resource ACL library.
//!
//! This crate assigns CRUD-grained allow/deny decisions to exact
//! (role, resource) pairs and resolves queries with inheritance over two
//! hierarchies: an ancestor's decision applies to its descendants unless a
//! more specific entry overrides it. Use [`Acl`] as the entry point, or the
//! [`Registry`], [`Chart`] and [`Resolver`] pieces directly.
//!
//! # Examples
//!
//! Default-deny policy with an override for an editor role:
//! ```
//! use hieracl::{Access, Acl, Action, ActionSelector, Entity};
//!
//! let mut acl = Acl::with_default(false);
//! let editor = Entity::from("editor");
//! let posts = Entity::from("posts");
//! acl.assign(&editor, &posts, Access::allow_all().with(Action::Delete, false))?;
//!
//! assert!(acl.is_allowed(&editor, &posts, Action::Read.into())?);
//! assert!(acl.is_denied(&editor, &posts, Action::Delete.into())?);
//! // Roles outside the override fall through to the default deny.
//! assert!(acl.is_denied(&Entity::from("guest"), &posts, ActionSelector::All)?);
//! # Ok::<(), hieracl::Error>(())
//! ```
//!
//! Hierarchies make decisions inherit:
//! ```
//! use hieracl::{Acl, ActionSelector, Entity};
//!
//! let mut acl = Acl::new();
//! let staff = Entity::from("staff");
//! let intern = Entity::from("intern");
//! acl.add_role(&staff, None)?;
//! acl.add_role(&intern, Some(&staff))?;
//! acl.assign(&staff, &Entity::from("wiki"), true)?;
//!
//! assert!(acl.is_allowed(&intern, &Entity::from("wiki"), ActionSelector::All)?);
//! # Ok::<(), hieracl::Error>(())
//! ```
#![forbid(unsafe_code)]

mod access;
mod acl;
mod chart;
mod error;
mod registry;
mod resolver;
mod trace;
mod types;

pub use crate::access::{Access, Action, ActionSelector};
pub use crate::acl::Acl;
pub use crate::chart::{Chart, ChartEntry};
pub use crate::error::{Error, Result};
pub use crate::registry::Registry;
pub use crate::resolver::Resolver;
pub use crate::trace::{TRACE_ENV_VAR, TraceLevel};
pub use crate::types::{Entity, ROOT, Record, RecordId};
