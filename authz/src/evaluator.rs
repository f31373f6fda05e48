//! Pure permission checks against a [`RoleRegistry`].

use tracing::debug;

use crate::registry::RoleRegistry;
use crate::types::{Permission, Role};

/// Does `role` hold `permission`?
pub fn has_permission(registry: &RoleRegistry, role: Role, permission: Permission) -> bool {
    registry.permissions_of(role).contains(&permission)
}

/// Checks a raw permission token. Unknown or malformed tokens are never held.
pub fn has_permission_token(registry: &RoleRegistry, role: Role, token: &str) -> bool {
    match token.parse::<Permission>() {
        Ok(permission) => has_permission(registry, role, permission),
        Err(_) => {
            debug!("Unknown permission token '{}' treated as not held", token);
            false
        }
    }
}

/// Does `role` hold at least one of `required`?
///
/// An empty list carries no restriction and is always satisfied.
pub fn has_any_permission(registry: &RoleRegistry, role: Role, required: &[Permission]) -> bool {
    if required.is_empty() {
        return true;
    }
    let held = registry.permissions_of(role);
    required.iter().any(|permission| held.contains(permission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_consistent_with_permission_set_membership() {
        let registry = RoleRegistry::builtin();
        for role in Role::ALL {
            for permission in Permission::ALL {
                assert_eq!(
                    has_permission(&registry, role, permission),
                    registry.permissions_of(role).contains(&permission),
                );
                assert_eq!(
                    has_permission_token(&registry, role, permission.as_str()),
                    has_permission(&registry, role, permission),
                );
            }
        }
    }

    #[rstest]
    #[case("listing.fly")]
    #[case("")]
    #[case("*")]
    #[case("ADMIN.SETTINGS")]
    #[case("admin.settings\0")]
    fn test_unknown_tokens_are_never_held(#[case] token: &str) {
        let registry = RoleRegistry::builtin();
        for role in Role::ALL {
            assert!(!has_permission_token(&registry, role, token));
        }
    }

    #[test]
    fn test_guest_cannot_create_listings() {
        let registry = RoleRegistry::builtin();
        assert!(!has_permission(
            &registry,
            Role::Guest,
            Permission::ListingCreate
        ));
        assert!(has_permission(&registry, Role::Guest, Permission::ListingView));
    }

    #[test]
    fn test_empty_requirement_is_always_satisfied() {
        let registry = RoleRegistry::builtin();
        for role in Role::ALL {
            assert!(has_any_permission(&registry, role, &[]));
        }
    }

    #[rstest]
    #[case(Role::Dealer, true)]
    #[case(Role::Garage, true)]
    #[case(Role::Seller, false)]
    #[case(Role::Buyer, false)]
    #[case(Role::Guest, false)]
    fn test_any_of_is_a_logical_or(#[case] role: Role, #[case] expected: bool) {
        let registry = RoleRegistry::builtin();
        let required = [Permission::ShowroomManage, Permission::GarageServicesManage];
        assert_eq!(has_any_permission(&registry, role, &required), expected);
    }
}
