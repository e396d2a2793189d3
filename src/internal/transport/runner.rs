use std::sync::Arc;

use tracing::debug;

use crate::internal::{
    mcp::{processor::McpProcessor, protocol::JsonRpcResponse},
    transport::{Transport, TransportError},
};

/// Drives a transport against the processor: read, parse, process, respond.
/// Responses are skipped for notifications (requests without an id).
pub struct TransportRunner<T: Transport> {
    transport: T,
    processor: Arc<McpProcessor>,
}

impl<T: Transport> TransportRunner<T> {
    pub fn new(transport: T, processor: Arc<McpProcessor>) -> Self {
        Self {
            transport,
            processor,
        }
    }

    pub async fn run(&mut self) -> Result<(), TransportError> {
        loop {
            let input = match self.transport.read_message().await {
                Ok(data) => data,
                Err(TransportError::Closed) => {
                    debug!("transport closed, exiting run loop");
                    break;
                }
                Err(e) => return Err(e),
            };

            let request = match McpProcessor::parse_request(&input) {
                Ok(request) => request,
                Err(e) => {
                    let error_response = JsonRpcResponse::error(
                        None, // parse errors carry no id
                        -32700,
                        format!("Parse error: {}", e),
                    );
                    self.write_response(&error_response).await?;
                    continue;
                }
            };

            debug!("processing request: method={}", request.method);
            let response = self.processor.process_request(&request).await;

            if request.id.is_some() {
                self.write_response(&response).await?;
            }
        }

        Ok(())
    }

    async fn write_response(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError> {
        let output = McpProcessor::serialize_response(response);
        self.transport.write_message(&output).await?;
        self.transport.flush().await
    }
}
