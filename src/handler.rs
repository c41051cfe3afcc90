use std::sync::Arc;

use serde_json::json;

use crate::{
    identity::PersonIdentity,
    interrupt::Interrupt,
    service::{IdentityCheckOutcome, IdentityVerificationService},
    validation::InputValidator,
};

pub const CREATED: u16 = 201;
pub const BAD_REQUEST: u16 = 400;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Response handed back to whatever HTTP front end hosts the handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HandlerResponse {
    fn json(status_code: u16, body: String) -> Self {
        HandlerResponse {
            status_code,
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body,
        }
    }
}

/// Handles `POST /identity-check` bodies: decode, validate, verify.
pub struct IdentityCheckHandler {
    service: IdentityVerificationService,
    validator: Arc<dyn InputValidator>,
}

impl IdentityCheckHandler {
    pub fn new(service: IdentityVerificationService, validator: Arc<dyn InputValidator>) -> Self {
        IdentityCheckHandler { service, validator }
    }

    /// Turns a raw request body into a status code and response body.
    ///
    /// * undecodable body: 500 with `{"error": ...}`
    /// * failed validation: 400 with the serialized [`crate::validation::ValidationResult`]
    /// * provider answered: 201 with the provider body unchanged
    /// * no result: 500 with `{}`
    pub async fn handle(&self, body: &str, interrupt: &Interrupt) -> HandlerResponse {
        let person_identity = match serde_json::from_str::<PersonIdentity>(body) {
            Ok(person_identity) => person_identity,
            Err(e) => {
                log::error!("Error handling request: {e}");
                let body = json!({ "error": e.to_string() }).to_string();
                return HandlerResponse::json(INTERNAL_SERVER_ERROR, body);
            }
        };

        let validation_result = self.validator.validate(&person_identity);
        if !validation_result.is_valid() {
            log::debug!(
                "Identity check request failed validation: {:?}",
                validation_result.errors
            );
            return match serde_json::to_string(&validation_result) {
                Ok(body) => HandlerResponse::json(BAD_REQUEST, body),
                Err(e) => {
                    log::error!("Failed to serialize validation result: {e}");
                    HandlerResponse::json(INTERNAL_SERVER_ERROR, "{}".to_owned())
                }
            };
        }

        match self.service.verify_identity(&person_identity, interrupt).await {
            IdentityCheckOutcome::Response(body) => HandlerResponse::json(CREATED, body),
            IdentityCheckOutcome::Unavailable => {
                HandlerResponse::json(INTERNAL_SERVER_ERROR, "{}".to_owned())
            }
        }
    }
}
