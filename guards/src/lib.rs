//! Render and navigation guards for the marketplace front end.
//!
//! Built on the [`authz`] role registry, this crate decides what the UI does
//! with a permission check:
//!
//! | Guard | Input | Output |
//! |-------|-------|--------|
//! | [`PermissionGuard`] | one permission | children or fallback |
//! | [`RouteGuard`] | any-of permission list, fallback path | render, wait, or redirect |
//! | [`PostAuthRouter`] | location after login | one navigation |
//!
//! # Explicit Context
//!
//! Guards never read a global principal. Every evaluation receives a
//! [`GuardContext`] carrying the registry, the current [`AuthState`] and a
//! [`authz::DecisionObserver`] that receives one event per decision.
//!
//! # Loading Gates Decisions
//!
//! [`AuthState::Loading`] is a first-class state. While loading, the render
//! guard shows its fallback without reporting a decision, the route guard
//! answers [`RouteDecision::Pending`] and the post-login router does not
//! navigate, so nobody is redirected before their principal resolves.
//!
//! # Example
//!
//! ```rust
//! use authz::{Permission, Principal, RoleRegistry, TracingObserver};
//! use guards::{
//!     AuthState, GuardContext, Location, PostAuthRouter, RecordingNavigator, RouteDecision,
//!     RouteGuard,
//! };
//!
//! let registry = RoleRegistry::builtin();
//! let auth = AuthState::Authenticated(Principal::new("u1", "dealer@example.com").with_role_id(5));
//! let ctx = GuardContext::new(&registry, &auth, &TracingObserver);
//!
//! let guard = RouteGuard::new(vec![Permission::ShowroomManage], "/");
//! assert_eq!(guard.evaluate(&ctx, &Location::parse("/showroom")), RouteDecision::Render);
//!
//! let mut navigator = RecordingNavigator::new();
//! let mut router = PostAuthRouter::new();
//! router.on_auth_change(&ctx, &Location::parse("/login"), &mut navigator).unwrap();
//! assert_eq!(navigator.last().unwrap().destination, "/showroom-dashboard");
//! ```

pub mod error;
pub mod location;
pub mod navigator;
pub mod post_auth;
pub mod render;
pub mod route;
pub mod session;

pub use error::NavigationError;
pub use location::Location;
pub use navigator::{NavigateOptions, NavigationRecord, Navigator, RecordingNavigator};
pub use post_auth::{resolve_destination, Destination, PostAuthRouter, REDIRECT_PARAM};
pub use render::{PermissionGuard, RenderDecision};
pub use route::{RouteDecision, RouteGuard};
pub use session::{AuthState, GuardContext, SessionScope};
