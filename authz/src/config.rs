//! Role table configuration loaded from YAML.
//!
//! ```yaml
//! id: roles
//! name: Marketplace roles
//! version: 1.0.0
//! role_ids:
//!   1: super_admin
//!   5: dealer
//! permissions:
//!   dealer: [listing.view, listing.create, showroom.manage]
//! landing:
//!   dealer: /showroom-dashboard
//! ```
//!
//! Role and permission names are kept as strings while parsing so that a
//! typo produces a precise [`AuthzError::UnknownRole`] or
//! [`AuthzError::UnknownPermission`] instead of a generic YAML error.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::registry::{RolePermissionSet, RoleRegistry};
use crate::types::{Permission, Role, RoleId};

/// Serialized form of a role table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleTableDefinition {
    /// Identifier for this table (e.g., "roles")
    pub id: String,

    /// Human-readable name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,

    /// Backend role id to role name
    #[serde(default)]
    pub role_ids: BTreeMap<u32, String>,

    /// Role name to permission tokens
    #[serde(default)]
    pub permissions: BTreeMap<String, Vec<String>>,

    /// Role name to landing path
    #[serde(default)]
    pub landing: BTreeMap<String, String>,
}

impl RoleTableDefinition {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Describes an existing registry, e.g. for dumping the built-in table.
    pub fn from_registry(registry: &RoleRegistry) -> Self {
        Self {
            id: "roles".to_string(),
            name: "Marketplace roles".to_string(),
            description: None,
            version: "1.0.0".to_string(),
            role_ids: registry
                .role_ids()
                .into_iter()
                .map(|(id, role)| (id.0, role.to_string()))
                .collect(),
            permissions: Role::ALL
                .into_iter()
                .map(|role| {
                    let tokens = registry
                        .permissions_of(role)
                        .iter()
                        .map(|p| p.to_string())
                        .collect();
                    (role.to_string(), tokens)
                })
                .collect(),
            landing: Role::ALL
                .into_iter()
                .map(|role| (role.to_string(), registry.landing_path(role).to_string()))
                .collect(),
        }
    }

    /// Validates names and builds the read-only registry.
    pub fn into_registry(self) -> Result<RoleRegistry> {
        let role_ids = self
            .role_ids
            .iter()
            .map(|(id, name)| Ok((RoleId(*id), name.parse::<Role>()?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let mut permissions = RolePermissionSet::new();
        for (name, tokens) in &self.permissions {
            let role = name.parse::<Role>()?;
            let set = tokens
                .iter()
                .map(|token| token.parse::<Permission>())
                .collect::<Result<BTreeSet<_>>>()?;
            permissions.entry(role).or_default().extend(set);
        }

        let landing = self
            .landing
            .iter()
            .map(|(name, path)| Ok((name.parse::<Role>()?, path.clone())))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let registry = RoleRegistry::new(role_ids, permissions, landing)?;
        info!(
            "Loaded role table '{}' version {} ({} role ids)",
            self.id,
            self.version,
            self.role_ids.len()
        );
        Ok(registry)
    }
}

/// Loads a registry from a YAML role table file.
pub fn load_registry(path: &Path) -> Result<RoleRegistry> {
    info!("Loading role table from {:?}", path);
    RoleTableDefinition::from_file(path)?.into_registry()
}
