use std::sync::Arc;

use crate::{
    config::CrossCoreApiConfig,
    error::Result,
    gateway::{CrossCoreApiRequestMapper, CrossCoreGateway, JsonSerializer, Transport},
    service::IdentityVerificationService,
    signer::HmacSigner,
};

/// Wires the identity check pipeline from configuration.
///
/// Everything is built in a fixed order (signer, mapper, transport, gateway,
/// service) so a bad key or endpoint stops startup before any request is served.
pub struct ServiceFactory;

impl ServiceFactory {
    /// Builds the service around the given transport.
    pub fn with_transport(
        config: &CrossCoreApiConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<IdentityVerificationService> {
        let signer = HmacSigner::new(&config.hmac_key)?;
        let request_mapper = CrossCoreApiRequestMapper::new(config.tenant_id.clone());

        let gateway = CrossCoreGateway::builder()
            .transport(transport)
            .request_mapper(request_mapper)
            .serializer(Arc::new(JsonSerializer))
            .signer(Arc::new(signer))
            .endpoint(config.endpoint())
            .build()?;

        log::info!(
            "CrossCore gateway ready for tenant '{}' at {}",
            config.tenant_id,
            config.endpoint_uri
        );

        Ok(IdentityVerificationService::new(Arc::new(gateway)))
    }

    /// Builds the service with an HTTPS transport configured from `config`.
    #[cfg(feature = "transport-reqwest")]
    pub fn from_config(config: &CrossCoreApiConfig) -> anyhow::Result<IdentityVerificationService> {
        use anyhow::Context;

        use crate::gateway::transport::ReqwestTransport;

        let identity_pem = config
            .client_identity_pem
            .as_ref()
            .map(|path| {
                std::fs::read(path).with_context(|| {
                    format!("Failed to read client identity {}", path.display())
                })
            })
            .transpose()?;

        let transport = ReqwestTransport::new(config.connect_timeout(), identity_pem.as_deref())?;

        Ok(Self::with_transport(config, Arc::new(transport))?)
    }

    /// Builds the request handler with the default validator.
    #[cfg(feature = "transport-reqwest")]
    pub fn handler_from_config(
        config: &CrossCoreApiConfig,
    ) -> anyhow::Result<crate::handler::IdentityCheckHandler> {
        use crate::{handler::IdentityCheckHandler, validation::PersonIdentityValidator};

        let service = Self::from_config(config)?;

        Ok(IdentityCheckHandler::new(
            service,
            Arc::new(PersonIdentityValidator),
        ))
    }
}
