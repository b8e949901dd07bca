//! Propagation of a principal's attribute bag to the preference store.

use crate::error::AuthError;
use crate::principal::SessionPrincipal;

/// External preference/profile store for the currently authenticated user.
pub trait PreferenceService: Send + Sync {
    fn set_current_user_preference_value(&self, key: &str, value: &str)
        -> Result<(), AuthError>;
}

/// Applies an external principal's attributes as persisted user preferences.
///
/// Entries are applied one by one in bag order with no transactional
/// grouping: a failure on one entry is logged and the remaining entries are
/// still applied. Partial application is explicit policy.
pub struct ProfileAttributeApplier {
    service: Box<dyn PreferenceService>,
}

impl ProfileAttributeApplier {
    pub fn new(service: Box<dyn PreferenceService>) -> Self {
        Self { service }
    }

    /// Write each attribute of an external principal to the preference store.
    /// Principals of any other shape are a no-op.
    pub fn apply(&self, principal: &SessionPrincipal) {
        let SessionPrincipal::External(principal) = principal else {
            tracing::debug!("Current principal carries no attribute bag, nothing to apply");
            return;
        };

        for (key, value) in principal.attributes().iter() {
            tracing::debug!(key = %key, "Setting user profile attribute");
            if let Err(e) = self.service.set_current_user_preference_value(key, value) {
                tracing::error!(key = %key, error = %e, "Cannot set user profile attribute");
            }
        }
    }
}
