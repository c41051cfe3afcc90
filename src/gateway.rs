/// CrossCore request wire types
pub mod dto;
/// Identity record to provider request mapping
pub mod request_mapper;
/// HTTP transport abstraction and the reqwest implementation
pub mod transport;

use std::sync::Arc;

pub use request_mapper::CrossCoreApiRequestMapper;
pub use transport::{OutboundRequest, Transport, TransportResponse};

use crate::{
    error::{Error, Result},
    gateway::dto::CrossCoreApiRequest,
    identity::PersonIdentity,
    interrupt::Interrupt,
    signer::Signer,
};

pub const ACCEPT_HEADER: &str = "Accept";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const HMAC_SIGNATURE_HEADER: &str = "hmac-signature";
pub const APPLICATION_JSON: &str = "application/json";

/// Turns a provider request into the text that is signed and sent.
pub trait RequestSerializer: Send + Sync {
    fn serialize(&self, request: &CrossCoreApiRequest) -> Result<String>;
}

/// Compact JSON via `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer;

impl RequestSerializer for JsonSerializer {
    fn serialize(&self, request: &CrossCoreApiRequest) -> Result<String> {
        Ok(serde_json::to_string(request)?)
    }
}

/// Where identity checks are sent and on whose behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    pub endpoint_uri: String,
    pub tenant_id: String,
}

/// Maps, signs and sends identity checks to the CrossCore API.
pub struct CrossCoreGateway {
    transport: Arc<dyn Transport>,
    request_mapper: CrossCoreApiRequestMapper,
    serializer: Arc<dyn RequestSerializer>,
    signer: Arc<dyn Signer>,
    endpoint: EndpointConfig,
}

impl CrossCoreGateway {
    pub fn builder() -> CrossCoreGatewayBuilder {
        CrossCoreGatewayBuilder::default()
    }

    /// Runs one identity check against the provider.
    ///
    /// The body is signed after serialization and sent unchanged, so the
    /// `hmac-signature` header always covers the exact bytes on the wire.
    ///
    /// # Arguments
    ///
    /// * `person_identity` - The person to check.
    /// * `interrupt` - Raised by the caller to abandon the call while it waits on the network.
    ///
    /// # Returns
    ///
    /// The provider's response body, whatever the HTTP status. Mapping, signing
    /// and transport failures are returned as errors; `Error::Interrupted` if the
    /// interrupt fired first.
    pub async fn perform_identity_check(
        &self,
        person_identity: &PersonIdentity,
        interrupt: &Interrupt,
    ) -> Result<String> {
        let api_request = self
            .request_mapper
            .map_person_identity(Some(person_identity))?;
        let request_body = self.serializer.serialize(&api_request)?;
        let request_body_hmac = self.signer.sign_payload(Some(&request_body))?;

        let request = OutboundRequest {
            method: "POST".to_owned(),
            uri: self.endpoint.endpoint_uri.clone(),
            headers: vec![
                (ACCEPT_HEADER.to_owned(), APPLICATION_JSON.to_owned()),
                (CONTENT_TYPE_HEADER.to_owned(), APPLICATION_JSON.to_owned()),
                (HMAC_SIGNATURE_HEADER.to_owned(), request_body_hmac),
            ],
            body: request_body,
        };

        log::trace!("Identity check request '{}'", request.uri);

        let response = tokio::select! {
            biased;
            _ = interrupt.interrupted() => return Err(Error::Interrupted),
            response = self.transport.send(request) => response?,
        };

        log::debug!("Identity check response status: {}", response.status);

        Ok(response.body)
    }
}

/// Collects the gateway's collaborators and rejects incomplete wiring at build time.
#[derive(Default)]
pub struct CrossCoreGatewayBuilder {
    transport: Option<Arc<dyn Transport>>,
    request_mapper: Option<CrossCoreApiRequestMapper>,
    serializer: Option<Arc<dyn RequestSerializer>>,
    signer: Option<Arc<dyn Signer>>,
    endpoint: Option<EndpointConfig>,
}

impl CrossCoreGatewayBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn request_mapper(mut self, request_mapper: CrossCoreApiRequestMapper) -> Self {
        self.request_mapper = Some(request_mapper);
        self
    }

    pub fn serializer(mut self, serializer: Arc<dyn RequestSerializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    pub fn signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn endpoint(mut self, endpoint: EndpointConfig) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn build(self) -> Result<CrossCoreGateway> {
        let transport = self.transport.ok_or_else(|| Error::missing("transport"))?;
        let request_mapper = self
            .request_mapper
            .ok_or_else(|| Error::missing("requestMapper"))?;
        let serializer = self.serializer.ok_or_else(|| Error::missing("serializer"))?;
        let signer = self.signer.ok_or_else(|| Error::missing("signer"))?;
        let endpoint = self.endpoint.ok_or_else(|| Error::missing("endpointConfig"))?;

        if endpoint.endpoint_uri.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "endpointUri must not be blank".to_owned(),
            ));
        }
        if endpoint.tenant_id != request_mapper.tenant_id() {
            return Err(Error::InvalidArgument(format!(
                "requestMapper tenant '{}' does not match endpoint tenant '{}'",
                request_mapper.tenant_id(),
                endpoint.tenant_id
            )));
        }

        Ok(CrossCoreGateway {
            transport,
            request_mapper,
            serializer,
            signer,
            endpoint,
        })
    }
}
