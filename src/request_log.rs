//! Per-request diagnostic sink.

use uuid::Uuid;

/// Fire-and-forget failure log for one incoming request.
pub trait RequestLog: Send + Sync {
    fn log_failure(&self, message: &str);
}

/// Emits failures as `tracing` warnings tagged with the request id.
#[derive(Debug, Clone)]
pub struct TracingRequestLog {
    request_id: Uuid,
}

impl TracingRequestLog {
    pub fn new(request_id: Uuid) -> Self {
        Self { request_id }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

impl RequestLog for TracingRequestLog {
    fn log_failure(&self, message: &str) {
        tracing::warn!(request_id = %self.request_id, "{message}");
    }
}
