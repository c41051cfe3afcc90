use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{Error, Result},
    gateway::CrossCoreGateway,
    identity::PersonIdentity,
    interrupt::Interrupt,
};

/// What the caller gets back from an identity check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityCheckOutcome {
    /// The provider's body, verbatim. It may still describe a failed verification.
    Response(String),
    /// No result could be obtained; the cause has already been logged.
    Unavailable,
}

impl IdentityCheckOutcome {
    pub fn into_response(self) -> Option<String> {
        match self {
            IdentityCheckOutcome::Response(body) => Some(body),
            IdentityCheckOutcome::Unavailable => None,
        }
    }
}

/// Anything able to run an identity check end to end.
///
/// Implemented by [`CrossCoreGateway`]; tests substitute their own.
#[async_trait]
pub trait IdentityCheckGateway: Send + Sync {
    async fn perform_identity_check(
        &self,
        person_identity: &PersonIdentity,
        interrupt: &Interrupt,
    ) -> Result<String>;
}

#[async_trait]
impl IdentityCheckGateway for CrossCoreGateway {
    async fn perform_identity_check(
        &self,
        person_identity: &PersonIdentity,
        interrupt: &Interrupt,
    ) -> Result<String> {
        CrossCoreGateway::perform_identity_check(self, person_identity, interrupt).await
    }
}

/// Runs identity checks and contains every gateway failure.
#[derive(Clone)]
pub struct IdentityVerificationService {
    gateway: Arc<dyn IdentityCheckGateway>,
}

impl IdentityVerificationService {
    pub fn new(gateway: Arc<dyn IdentityCheckGateway>) -> Self {
        IdentityVerificationService { gateway }
    }

    /// Verifies a person with the provider.
    ///
    /// Never fails: any error from the gateway is logged and reported as
    /// [`IdentityCheckOutcome::Unavailable`]. If the check was interrupted the
    /// interrupt is raised again on `interrupt` so the caller still observes it.
    pub async fn verify_identity(
        &self,
        person_identity: &PersonIdentity,
        interrupt: &Interrupt,
    ) -> IdentityCheckOutcome {
        match self
            .gateway
            .perform_identity_check(person_identity, interrupt)
            .await
        {
            Ok(body) => IdentityCheckOutcome::Response(body),
            Err(Error::Interrupted) => {
                log::error!("Identity check interrupted while invoking the CrossCore API");
                interrupt.interrupt();
                IdentityCheckOutcome::Unavailable
            }
            Err(e) => {
                log::error!(
                    "Error occurred when attempting to invoke the CrossCore API ({}): {e}",
                    e.kind()
                );
                IdentityCheckOutcome::Unavailable
            }
        }
    }
}
