//! The role registry: role-id resolution, role permission sets and landing paths.
//!
//! A registry is built once at startup (from [`RoleRegistry::builtin`] or a
//! YAML role table, see [`crate::config`]) and is read-only afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

use crate::error::{AuthzError, Result};
use crate::types::{Permission, Role, RoleId};

/// Mapping from role to the permissions it holds.
pub type RolePermissionSet = BTreeMap<Role, BTreeSet<Permission>>;

static NO_PERMISSIONS: BTreeSet<Permission> = BTreeSet::new();

/// Read-only lookup tables for role resolution and permission membership.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    role_ids: HashMap<RoleId, Role>,
    permissions: RolePermissionSet,
    landing: BTreeMap<Role, String>,
}

impl RoleRegistry {
    /// Builds a registry from raw tables.
    ///
    /// Every role in [`Role::ALL`] ends up with a permission entry and a
    /// landing path. Missing permission entries become empty sets, missing
    /// landing paths fall back to [`Role::default_landing`].
    ///
    /// # Errors
    ///
    /// - a role id mapped to [`Role::DEFAULT`] (the default role is implicit)
    /// - a landing path that is not an absolute, same-origin path
    pub fn new(
        role_ids: HashMap<RoleId, Role>,
        mut permissions: RolePermissionSet,
        mut landing: BTreeMap<Role, String>,
    ) -> Result<Self> {
        if let Some((id, _)) = role_ids.iter().find(|(_, role)| **role == Role::DEFAULT) {
            return Err(AuthzError::Validation(format!(
                "role id {} maps to the implicit default role '{}'",
                id,
                Role::DEFAULT
            )));
        }

        for (role, path) in &landing {
            if !is_local_path(path) {
                return Err(AuthzError::Validation(format!(
                    "landing path '{}' for role '{}' must start with a single '/'",
                    path, role
                )));
            }
        }

        for role in Role::ALL {
            permissions.entry(role).or_insert_with(|| {
                warn!("Role '{}' has no permission entry, using empty set", role);
                BTreeSet::new()
            });
            landing
                .entry(role)
                .or_insert_with(|| role.default_landing().to_string());
        }

        Ok(Self {
            role_ids,
            permissions,
            landing,
        })
    }

    /// The built-in marketplace role table.
    pub fn builtin() -> Self {
        use Permission::*;

        let role_ids = HashMap::from([
            (RoleId(1), Role::SuperAdmin),
            (RoleId(2), Role::Admin),
            (RoleId(3), Role::Seller),
            (RoleId(4), Role::Buyer),
            (RoleId(5), Role::Dealer),
            (RoleId(6), Role::Garage),
        ]);

        let seller = [
            ListingView,
            ListingCreate,
            ListingEdit,
            ListingDelete,
            FavoritesManage,
            InquiryRespond,
        ];

        let mut permissions = RolePermissionSet::new();
        permissions.insert(Role::Guest, BTreeSet::from([ListingView]));
        permissions.insert(
            Role::Buyer,
            BTreeSet::from([ListingView, FavoritesManage, InquirySend, BookingManage]),
        );
        permissions.insert(Role::Seller, BTreeSet::from(seller));
        permissions.insert(
            Role::Dealer,
            seller
                .into_iter()
                .chain([ShowroomManage, ReportsView])
                .collect(),
        );
        permissions.insert(
            Role::Garage,
            BTreeSet::from([
                ListingView,
                GarageServicesManage,
                BookingManage,
                InquiryRespond,
            ]),
        );
        permissions.insert(
            Role::Admin,
            BTreeSet::from([
                ListingView,
                ListingEdit,
                ListingDelete,
                ListingModerate,
                UsersManage,
                ReportsView,
                AdminDashboard,
            ]),
        );
        permissions.insert(Role::SuperAdmin, Permission::ALL.into_iter().collect());

        let landing = Role::ALL
            .into_iter()
            .map(|role| (role, role.default_landing().to_string()))
            .collect();

        Self {
            role_ids,
            permissions,
            landing,
        }
    }

    /// Resolves an external role id to a canonical role.
    ///
    /// Absent or unmapped ids resolve to [`Role::DEFAULT`], never to an
    /// elevated role.
    pub fn resolve_role(&self, role_id: Option<RoleId>) -> Role {
        let Some(role_id) = role_id else {
            debug!("No role id present, resolving to '{}'", Role::DEFAULT);
            return Role::DEFAULT;
        };

        match self.role_ids.get(&role_id) {
            Some(role) => *role,
            None => {
                warn!(
                    "Unmapped role id {}, resolving to '{}'",
                    role_id,
                    Role::DEFAULT
                );
                Role::DEFAULT
            }
        }
    }

    /// The permissions held by `role`. Never panics; empty for roles with none.
    pub fn permissions_of(&self, role: Role) -> &BTreeSet<Permission> {
        self.permissions.get(&role).unwrap_or(&NO_PERMISSIONS)
    }

    /// Where a freshly authenticated principal with `role` lands by default.
    pub fn landing_path(&self, role: Role) -> &str {
        self.landing
            .get(&role)
            .map(String::as_str)
            .unwrap_or_else(|| role.default_landing())
    }

    /// Role ids known to this registry, sorted.
    pub fn role_ids(&self) -> Vec<(RoleId, Role)> {
        let mut ids: Vec<_> = self.role_ids.iter().map(|(id, role)| (*id, *role)).collect();
        ids.sort();
        ids
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// True for paths like `/admin`, false for `//host`, `https://..` or empty.
///
/// Control characters are rejected outright: browsers strip tab, CR and LF
/// from URLs, which turns `/\t/host` into `//host`.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
