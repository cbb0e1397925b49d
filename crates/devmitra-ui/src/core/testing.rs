//! Test doubles shared by the controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use devmitra_api_models::{ActionAck, EntityAction, EntityKind};

use crate::core::actions::{EntityGateway, GatewayError};
use crate::core::list::CardId;

type Call = (EntityKind, CardId, EntityAction);

/// Gateway replaying canned acknowledgements in order.
pub(crate) struct ScriptedGateway {
    responses: RefCell<VecDeque<Result<ActionAck, GatewayError>>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedGateway {
    pub(crate) fn new(responses: Vec<Result<ActionAck, GatewayError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl EntityGateway for ScriptedGateway {
    async fn perform(
        &self,
        kind: EntityKind,
        id: &CardId,
        action: EntityAction,
    ) -> Result<ActionAck, GatewayError> {
        self.calls.borrow_mut().push((kind, id.clone(), action));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted response".to_string())))
    }
}
