use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::internal::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};

use super::{Transport, TransportError};

/// Mock transport for testing - allows injecting requests and capturing
/// responses. Reading past the queued inputs reports the transport closed.
#[derive(Clone, Default)]
pub struct MockTransport {
    inputs: Arc<Mutex<VecDeque<Vec<u8>>>>,
    outputs: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw message to be read
    pub fn queue_input(&self, data: Vec<u8>) {
        self.inputs.lock().unwrap().push_back(data);
    }

    /// Queue a JSON-RPC request
    pub fn queue_request(&self, request: &JsonRpcRequest) {
        let json = serde_json::to_vec(request).unwrap();
        self.queue_input(json);
    }

    /// Captured outputs as raw bytes
    pub fn get_outputs(&self) -> Vec<Vec<u8>> {
        self.outputs.lock().unwrap().clone()
    }

    /// Captured outputs as parsed responses
    pub fn get_responses(&self) -> Vec<JsonRpcResponse> {
        self.get_outputs()
            .iter()
            .filter_map(|data| serde_json::from_slice(data).ok())
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn read_message(&mut self) -> Result<Vec<u8>, TransportError> {
        self.inputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(TransportError::Closed)
    }

    async fn write_message(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.outputs.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }
}
