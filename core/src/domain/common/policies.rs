use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
};

pub fn ensure_policy(
    result_has_permission: Result<bool, CoreError>,
    error_message: &str,
) -> Result<(), CoreError> {
    result_has_permission
        .map_err(|e| CoreError::Forbidden(e.to_string()))?
        .then_some(())
        .ok_or_else(|| CoreError::Forbidden(error_message.to_string()))
}

/// Resources that belong to a single user.
pub trait Owned {
    fn owner_id(&self) -> Option<Uuid>;

    fn is_owned_by(&self, identity: &Identity) -> bool {
        self.owner_id() == Some(identity.id())
    }
}

pub fn ensure_owner<T: Owned>(
    resource: &T,
    identity: &Identity,
    error_message: &str,
) -> Result<(), CoreError> {
    ensure_policy(Ok(resource.is_owned_by(identity)), error_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_policy_maps_false_to_forbidden() {
        let result = ensure_policy(Ok(false), "insufficient permissions");
        assert_eq!(
            result,
            Err(CoreError::Forbidden("insufficient permissions".to_string()))
        );
        assert!(ensure_policy(Ok(true), "unused").is_ok());
    }

    #[test]
    fn ensure_policy_wraps_lookup_errors() {
        let result = ensure_policy(Err(CoreError::NotFound), "insufficient permissions");
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }
}
