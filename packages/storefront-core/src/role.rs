use serde::{Deserialize, Serialize};

/// Access level attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

pub fn is_admin(roles: &[Role]) -> bool {
    roles.contains(&Role::Admin)
}

/// Route-level access check. Admin passes every check; otherwise the caller
/// needs at least one of the required roles. Routes with no required roles
/// are open to any authenticated caller.
pub fn authorize(required: &[Role], caller: &[Role]) -> bool {
    if required.is_empty() {
        return true;
    }
    if is_admin(caller) {
        return true;
    }
    required.iter().any(|role| caller.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        assert!(is_admin(&[Role::User, Role::Admin]));
        assert!(is_admin(&[Role::Admin]));
        assert!(!is_admin(&[Role::User]));
        assert!(!is_admin(&[]));
    }

    #[test]
    fn test_authorize_no_required_roles() {
        assert!(authorize(&[], &[Role::User]));
        assert!(authorize(&[], &[]));
    }

    #[test]
    fn test_authorize_admin_bypasses_requirements() {
        assert!(authorize(&[Role::User], &[Role::Admin]));
        assert!(authorize(&[Role::Admin], &[Role::User, Role::Admin]));
    }

    #[test]
    fn test_authorize_requires_intersection() {
        assert!(authorize(&[Role::User], &[Role::User]));
        assert!(!authorize(&[Role::Admin], &[Role::User]));
        assert!(!authorize(&[Role::Admin], &[]));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
