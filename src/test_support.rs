use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::{Error, Result},
    gateway::transport::{OutboundRequest, Transport, TransportResponse},
    identity::{Address, AddressType, PersonIdentity},
};

pub(crate) fn test_person_identity(address_type: AddressType) -> PersonIdentity {
    PersonIdentity {
        first_name: "Jane".to_owned(),
        surname: "Doe".to_owned(),
        date_of_birth: NaiveDate::from_ymd_opt(1976, 12, 26).unwrap(),
        addresses: vec![Address {
            address_type,
            post_town: "PostTown".to_owned(),
            street: "Street Name".to_owned(),
            postal: "Postcode".to_owned(),
        }],
    }
}

/// What the mock transport does when a request arrives.
#[derive(Clone, Debug)]
pub(crate) enum MockReply {
    Respond { status: u16, body: String },
    Fail(String),
    /// Never completes, so only an interrupt can end the call.
    Hang,
}

/// Transport that records every request and answers with a canned reply.
#[derive(Clone)]
pub(crate) struct MockTransport {
    reply: MockReply,
    pub(crate) requests: Arc<Mutex<Vec<OutboundRequest>>>,
}

impl MockTransport {
    pub(crate) fn new(reply: MockReply) -> Self {
        MockTransport {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn responding(status: u16, body: &str) -> Self {
        Self::new(MockReply::Respond {
            status,
            body: body.to_owned(),
        })
    }

    pub(crate) fn recorded(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);

        match &self.reply {
            MockReply::Respond { status, body } => Ok(TransportResponse {
                status: *status,
                body: body.clone(),
            }),
            MockReply::Fail(msg) => Err(Error::Transport(msg.clone())),
            MockReply::Hang => Ok(std::future::pending::<TransportResponse>().await),
        }
    }
}
