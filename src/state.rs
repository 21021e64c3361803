//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! gateway keeps no session data of its own; it only needs its configuration
//! and a handle to the upstream API.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::services::upstream::UpstreamApi;

/// Clone is required by Axum; all fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: Arc<dyn UpstreamApi>,
}

impl AppState {
    #[must_use]
    pub fn new(config: GatewayConfig, upstream: Arc<dyn UpstreamApi>) -> Self {
        Self { config: Arc::new(config), upstream }
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.config.cookie_secure
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::http::Method;
    use serde_json::{Value, json};

    use crate::config::UpstreamTimeouts;
    use crate::services::upstream::{UpstreamError, UpstreamReply, UpstreamRequest};

    enum Scripted {
        Reply(UpstreamReply),
        Transport,
    }

    /// Scripted upstream. Routes are keyed by method and path and answer the
    /// same way every time; unknown routes answer 404. Every request is
    /// recorded in arrival order.
    #[derive(Default)]
    pub struct MockUpstream {
        routes: Mutex<HashMap<(Method, String), Scripted>>,
        requests: Mutex<Vec<UpstreamRequest>>,
    }

    impl MockUpstream {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
            self.routes
                .lock()
                .unwrap()
                .insert((method, path.to_owned()), Scripted::Reply(UpstreamReply { status, body }));
        }

        pub fn fail(&self, method: Method, path: &str) {
            self.routes.lock().unwrap().insert((method, path.to_owned()), Scripted::Transport);
        }

        #[must_use]
        pub fn requests(&self) -> Vec<UpstreamRequest> {
            self.requests.lock().unwrap().clone()
        }

        #[must_use]
        pub fn paths(&self) -> Vec<String> {
            self.requests().into_iter().map(|r| format!("{} {}", r.method, r.path)).collect()
        }
    }

    #[async_trait]
    impl UpstreamApi for MockUpstream {
        async fn send(&self, request: UpstreamRequest) -> Result<UpstreamReply, UpstreamError> {
            let key = (request.method.clone(), request.path.clone());
            self.requests.lock().unwrap().push(request);
            match self.routes.lock().unwrap().get(&key) {
                Some(Scripted::Reply(reply)) => Ok(reply.clone()),
                Some(Scripted::Transport) => Err(UpstreamError::Transport("connection refused".into())),
                None => Ok(UpstreamReply { status: 404, body: json!({ "message": "Not found" }) }),
            }
        }
    }

    #[must_use]
    pub fn test_config() -> GatewayConfig {
        GatewayConfig {
            port: 0,
            upstream_base_url: "http://upstream.test/api/v1".into(),
            upstream_api_key: "test-key".into(),
            timeouts: UpstreamTimeouts { request_secs: 5, connect_secs: 1 },
            cookie_secure: false,
            public_dir: std::env::temp_dir().join("roamly-test-public"),
        }
    }

    /// Create a test `AppState` backed by the given mock.
    #[must_use]
    pub fn test_app_state(upstream: Arc<MockUpstream>) -> AppState {
        AppState::new(test_config(), upstream)
    }

    #[must_use]
    pub fn user_json(id: &str, role: &str) -> Value {
        json!({ "id": id, "name": "Test User", "email": format!("{id}@example.com"), "role": role })
    }

    /// Script a successful `GET /user` returning a user with `role`.
    pub fn script_identity(upstream: &MockUpstream, role: &str) {
        upstream.on(Method::GET, "user", 200, json!({ "code": "200", "data": user_json("u-1", role) }));
    }
}
