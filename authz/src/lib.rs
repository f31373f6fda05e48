//! Role-based access control for the marketplace front end.
//!
//! This crate answers one question: does a principal's role hold a given
//! permission? It provides the closed [`Role`] and [`Permission`] sets, the
//! [`RoleRegistry`] that maps backend role ids onto roles and roles onto
//! permission sets, and pure evaluation functions over them.
//!
//! # Decision Flow
//!
//! ```text
//! Principal.role_id ──► RoleRegistry::resolve_role ──► Role
//!                                                       │
//! Permission ───────────► evaluator::has_permission ◄───┘ ──► bool
//! ```
//!
//! # Fail Closed
//!
//! Nothing in the evaluation path returns an error. Ambiguity always
//! resolves to "deny":
//!
//! - a missing or unmapped role id resolves to [`Role::Guest`]
//! - an unknown permission token is never held
//! - a missing principal is evaluated as a guest
//!
//! These checks mirror server policy for UX purposes. The server remains
//! the authority and must enforce the same rules independently.
//!
//! # Example
//!
//! ```rust
//! use authz::{evaluator, Permission, Principal, RoleRegistry};
//!
//! let registry = RoleRegistry::builtin();
//! let principal = Principal::new("u1", "dealer@example.com").with_role_id(5);
//!
//! let role = registry.resolve_role(principal.role_id);
//! assert!(evaluator::has_permission(&registry, role, Permission::ShowroomManage));
//! assert!(!evaluator::has_permission_token(&registry, role, "admin.settings"));
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod registry;
pub mod types;

pub use audit::{DecisionEvent, DecisionObserver, NoopObserver, TracingObserver};
pub use config::{load_registry, RoleTableDefinition};
pub use error::{AuthzError, Result};
pub use registry::{RolePermissionSet, RoleRegistry};
pub use types::{Permission, Principal, Role, RoleId};
