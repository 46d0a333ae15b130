//! Role gates and tenant scope resolution.
//!
//! Tenant isolation hinges on one rule: a gym_admin's effective gym is always the
//! one embedded in their token. Path-supplied gym ids are only honored for
//! platform operators.

use crate::{
    api::models::accounts::{CurrentAccount, Role},
    errors::{Error, Result},
    types::GymId,
};

/// Reject any caller that is not a platform operator.
pub fn require_platform_operator(account: &CurrentAccount) -> Result<()> {
    match account.role {
        Role::PlatformOperator => Ok(()),
        _ => Err(Error::Forbidden {
            reason: "Platform operator role required".to_string(),
        }),
    }
}

/// Resolve the gym a request is allowed to operate on.
///
/// - `gym_admin`: the token's gym, always. A path naming a different gym is a 403.
/// - `platform_operator`: the path's gym id is honored (explicit cross-tenant access).
/// - anything else: 403.
pub fn resolve_tenant(account: &CurrentAccount, path_gym_id: GymId) -> Result<GymId> {
    match account.role {
        Role::PlatformOperator => Ok(path_gym_id),
        Role::GymAdmin => {
            let own_gym = account.gym_id.ok_or_else(|| Error::Forbidden {
                reason: "Gym admin account has no gym assigned".to_string(),
            })?;
            if own_gym != path_gym_id {
                return Err(Error::Forbidden {
                    reason: "Access to this gym is not permitted".to_string(),
                });
            }
            Ok(own_gym)
        }
        Role::Member => Err(Error::Forbidden {
            reason: "Gym admin role required".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn account(role: Role, gym_id: Option<Uuid>) -> CurrentAccount {
        CurrentAccount {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            gym_id,
            gym_name: None,
        }
    }

    #[test]
    fn test_require_platform_operator() {
        assert!(require_platform_operator(&account(Role::PlatformOperator, None)).is_ok());
        assert!(require_platform_operator(&account(Role::GymAdmin, Some(Uuid::new_v4()))).is_err());
        assert!(require_platform_operator(&account(Role::Member, Some(Uuid::new_v4()))).is_err());
    }

    #[test]
    fn test_gym_admin_scoped_to_own_gym() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let admin = account(Role::GymAdmin, Some(own));

        assert_eq!(resolve_tenant(&admin, own).unwrap(), own);

        let err = resolve_tenant(&admin, other).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_operator_can_name_any_gym() {
        let operator = account(Role::PlatformOperator, None);
        let gym = Uuid::new_v4();
        assert_eq!(resolve_tenant(&operator, gym).unwrap(), gym);
    }

    #[test]
    fn test_member_and_unbound_admin_rejected() {
        let gym = Uuid::new_v4();
        assert!(resolve_tenant(&account(Role::Member, Some(gym)), gym).is_err());
        assert!(resolve_tenant(&account(Role::GymAdmin, None), gym).is_err());
    }
}
