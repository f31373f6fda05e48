//! Core access-control types: roles, permissions, role ids and principals.
//!
//! Roles and permissions are closed enumerations. Adding a permission means
//! adding a variant here, which forces every exhaustive match (and the
//! built-in role table) to be revisited at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthzError;

/// A canonical identity category granted to a principal.
///
/// `Guest` is the lowest-privilege role. It is what every missing or
/// unrecognized role id resolves to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    Buyer,
    Seller,
    Dealer,
    Garage,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Every role in the closed set, lowest privilege first.
    pub const ALL: [Role; 7] = [
        Role::Guest,
        Role::Buyer,
        Role::Seller,
        Role::Dealer,
        Role::Garage,
        Role::Admin,
        Role::SuperAdmin,
    ];

    /// The role used when a principal is absent or its role id is unmapped.
    pub const DEFAULT: Role = Role::Guest;

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Dealer => "dealer",
            Role::Garage => "garage",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Built-in landing page for a freshly authenticated principal.
    pub fn default_landing(&self) -> &'static str {
        match self {
            Role::Guest | Role::Buyer => "/",
            Role::Seller => "/my-listings",
            Role::Dealer => "/showroom-dashboard",
            Role::Garage => "/garage-dashboard",
            Role::Admin | Role::SuperAdmin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    /// Accepts `super_admin`, `SUPER_ADMIN` and `super-admin` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
    }
}

/// A capability token checked against a role's permission set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Permission {
    #[serde(rename = "listing.view")]
    ListingView,
    #[serde(rename = "listing.create")]
    ListingCreate,
    #[serde(rename = "listing.edit")]
    ListingEdit,
    #[serde(rename = "listing.delete")]
    ListingDelete,
    #[serde(rename = "listing.moderate")]
    ListingModerate,
    #[serde(rename = "favorites.manage")]
    FavoritesManage,
    #[serde(rename = "inquiry.send")]
    InquirySend,
    #[serde(rename = "inquiry.respond")]
    InquiryRespond,
    #[serde(rename = "showroom.manage")]
    ShowroomManage,
    #[serde(rename = "garage.services.manage")]
    GarageServicesManage,
    #[serde(rename = "booking.manage")]
    BookingManage,
    #[serde(rename = "reports.view")]
    ReportsView,
    #[serde(rename = "users.manage")]
    UsersManage,
    #[serde(rename = "roles.manage")]
    RolesManage,
    #[serde(rename = "admin.dashboard")]
    AdminDashboard,
    #[serde(rename = "admin.settings")]
    AdminSettings,
}

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::ListingView,
        Permission::ListingCreate,
        Permission::ListingEdit,
        Permission::ListingDelete,
        Permission::ListingModerate,
        Permission::FavoritesManage,
        Permission::InquirySend,
        Permission::InquiryRespond,
        Permission::ShowroomManage,
        Permission::GarageServicesManage,
        Permission::BookingManage,
        Permission::ReportsView,
        Permission::UsersManage,
        Permission::RolesManage,
        Permission::AdminDashboard,
        Permission::AdminSettings,
    ];

    /// The dotted token used in configuration and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ListingView => "listing.view",
            Permission::ListingCreate => "listing.create",
            Permission::ListingEdit => "listing.edit",
            Permission::ListingDelete => "listing.delete",
            Permission::ListingModerate => "listing.moderate",
            Permission::FavoritesManage => "favorites.manage",
            Permission::InquirySend => "inquiry.send",
            Permission::InquiryRespond => "inquiry.respond",
            Permission::ShowroomManage => "showroom.manage",
            Permission::GarageServicesManage => "garage.services.manage",
            Permission::BookingManage => "booking.manage",
            Permission::ReportsView => "reports.view",
            Permission::UsersManage => "users.manage",
            Permission::RolesManage => "roles.manage",
            Permission::AdminDashboard => "admin.dashboard",
            Permission::AdminSettings => "admin.settings",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AuthzError;

    /// Tokens are matched exactly; there is no case folding for permissions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownPermission(s.to_string()))
    }
}

/// Opaque role identifier attached to a principal record by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoleId(pub u32);

impl From<u32> for RoleId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated actor whose role is being evaluated.
///
/// Principals are produced by the authentication collaborator and are
/// read-only here. A principal without a `role_id` is treated as a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable identifier of the account
    pub id: String,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Backend role id, resolved through the role registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
}

impl Principal {
    /// Creates a principal with no role id attached.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: None,
            role_id: None,
        }
    }

    pub fn with_role_id(mut self, role_id: impl Into<RoleId>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
