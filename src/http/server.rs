//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, access log, CORS, timeout, request log with body cap)
//! - Route unmatched method/path pairs to the unknown-endpoint handler
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::config::PhonebookConfig;
use crate::http::handlers::{
    create_person, delete_person, get_person, info, list_persons, root, unknown_endpoint,
    update_person,
};
use crate::http::middleware::request_logger;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::store::PersonStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
    pub config: Arc<PhonebookConfig>,
}

/// HTTP server for the phonebook API.
pub struct HttpServer {
    router: Router,
    config: Arc<PhonebookConfig>,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: PhonebookConfig, store: Arc<dyn PersonStore>) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            store,
            config: config.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &PhonebookConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(root))
            .route("/info", get(info))
            .route("/api/persons", get(list_persons).post(create_person))
            .route(
                "/api/persons/{id}",
                get(get_person).put(update_person).delete(delete_person),
            )
            .fallback(unknown_endpoint)
            .method_not_allowed_fallback(unknown_endpoint)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(middleware::from_fn_with_state(state.clone(), request_logger))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(CorsLayer::permissive())
            .layer(propagate_request_id_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &Request<Body>| request_span(req))
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            )
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            max_body_size = self.config.security.max_body_size,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DisconnectedStore, MemoryStore};
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn server(store: Arc<dyn PersonStore>) -> Router {
        let mut config = PhonebookConfig::default();
        config.listener.port = Some(0);
        HttpServer::new(config, store).router()
    }

    fn request(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let app = server(Arc::new(MemoryStore::new()));
        let response = app.oneshot(request(Method::GET, "/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(body_string(response).await, "<h1>Hi there</h1>");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = server(Arc::new(MemoryStore::new()));
        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/persons",
                Some(r#"{"name":"Arto Hellas","number":"040-123456"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let id = created["id"].as_str().unwrap();

        let response = app
            .oneshot(request(Method::GET, &format!("/api/persons/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_wrong_method_is_unknown_endpoint() {
        let app = server(Arc::new(MemoryStore::new()));
        let response = app
            .oneshot(request(Method::PATCH, "/api/persons", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, r#"{"error":"unknown endpoint"}"#);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = PhonebookConfig::default();
        config.security.max_body_size = 16;
        let app = HttpServer::new(config, Arc::new(MemoryStore::new())).router();

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/persons",
                Some(r#"{"name":"Arto Hellas","number":"040-123456"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
        assert_eq!(
            body_string(response).await,
            r#"{"error":"request body too large"}"#
        );
    }

    #[tokio::test]
    async fn test_oversized_content_length_rejected_as_json() {
        let mut config = PhonebookConfig::default();
        config.security.max_body_size = 16;
        let app = HttpServer::new(config, Arc::new(MemoryStore::new())).router();

        let body = r#"{"name":"Arto Hellas","number":"040-123456"}"#;
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/persons")
            .header("content-type", "application/json")
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"request body too large"}"#
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_access_log_at_info() {
        use std::io::Write;
        use std::sync::Mutex;

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = server(Arc::new(MemoryStore::new()));
        let response = app.oneshot(request(Method::GET, "/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("finished processing request"), "{output}");
        assert!(output.contains("status=200"), "{output}");
        assert!(output.contains("ms"), "{output}");
    }

    #[tokio::test]
    async fn test_disconnected_store_keeps_static_routes() {
        let app = server(Arc::new(DisconnectedStore::new("unreachable")));

        let response = app.clone().oneshot(request(Method::GET, "/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(request(Method::GET, "/api/persons", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
