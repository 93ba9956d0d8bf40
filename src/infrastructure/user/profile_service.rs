//! Caller profile lookup

use std::sync::Arc;

use tracing::debug;

use crate::domain::auth::ProfileOutcome;
use crate::domain::identity::{IdentityResolver, RequestContext};
use crate::domain::user::UserStore;
use crate::domain::DomainError;
use crate::infrastructure::observability::record_outcome;

/// Returns the account behind the caller's email claim
#[derive(Debug)]
pub struct ProfileService<R: UserStore + ?Sized> {
    store: Arc<R>,
    resolver: IdentityResolver,
}

impl<R: UserStore + ?Sized> ProfileService<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            resolver: IdentityResolver::new(),
        }
    }

    /// Resolve the caller from `context`, then load their record
    pub async fn get_profile(&self, context: &RequestContext) -> Result<ProfileOutcome, DomainError> {
        let outcome = match self.resolver.resolve(context) {
            Err(missing) => {
                debug!("Profile lookup without identity: {}", missing);
                ProfileOutcome::Unauthorized
            }
            Ok(identity) => match self.store.find_by_email(identity.email()).await? {
                Some(user) => ProfileOutcome::Found(user),
                None => {
                    debug!(email = %identity.email(), "No account for resolved identity");
                    ProfileOutcome::NotFound
                }
            },
        };

        record_outcome("profile", outcome.kind());
        Ok(outcome)
    }
}
