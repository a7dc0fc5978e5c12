//! Sign-up backend: username availability and account creation.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use dashmap::DashSet;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Method;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::header::HeaderValue;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::form::FormEvent;
use crate::form::SignupForm;
use crate::wire::SIGNUP_PATH;
use crate::wire::SignupRequest;
use crate::wire::VALIDATE_PATH;
use crate::wire::ValidateRequest;
use crate::wire::Welcome;

/// Message returned for an unavailable username.
pub const USERNAME_TAKEN: &str = "username is already taken";

// =============================================================================
// Registry
// =============================================================================

/// In-memory set of usernames that are no longer available.
///
/// Names are compared case-insensitively.
#[derive(Debug, Default)]
pub struct Registry {
    taken: DashSet<String>,
}

/// Why a sign-up was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The request failed the form's own rules.
    Invalid(Vec<String>),
    /// Someone already has the username.
    Taken,
}

impl Registry {
    /// Creates a registry with some names already taken.
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            taken: taken.into_iter().map(|name| normalize(name.as_ref())).collect(),
        }
    }

    /// Errors for `username`, empty when it is free.
    pub fn availability(&self, username: &str) -> Vec<String> {
        if self.taken.contains(&normalize(username)) {
            vec![USERNAME_TAKEN.to_string()]
        } else {
            Vec::new()
        }
    }

    /// Validates the request and claims its username.
    pub fn register(&self, request: &SignupRequest) -> Result<Welcome, Rejection> {
        let form = SignupForm::from_request(request).update(FormEvent::Submit);
        let errors: Vec<String> = form.all_errors().into_iter().cloned().collect();
        if !errors.is_empty() {
            return Err(Rejection::Invalid(errors));
        }

        // Insert doubles as the availability check.
        if !self.taken.insert(normalize(&request.username)) {
            return Err(Rejection::Taken);
        }

        Ok(Welcome {
            message: format!("Welcome, {}!", request.display_name()),
        })
    }

    /// Number of taken usernames.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

fn normalize(username: &str) -> String {
    username.to_lowercase()
}

// =============================================================================
// Routing
// =============================================================================

/// Maps one request to a status and JSON body.
fn route(registry: &Registry, method: &Method, path: &str, body: &[u8]) -> (StatusCode, Value) {
    let is_post = *method == Method::POST;
    match (path, is_post) {
        (VALIDATE_PATH, true) => match parse_body::<ValidateRequest>(body) {
            Ok(request) => (StatusCode::OK, json!(registry.availability(&request.username))),
            Err(response) => response,
        },
        (SIGNUP_PATH, true) => match parse_body::<SignupRequest>(body) {
            Ok(request) => match registry.register(&request) {
                Ok(welcome) => {
                    log::info!("Signed up {:?}", request.username);
                    (StatusCode::OK, json!(welcome))
                }
                Err(Rejection::Taken) => (StatusCode::CONFLICT, json!([USERNAME_TAKEN])),
                Err(Rejection::Invalid(errors)) => (StatusCode::UNPROCESSABLE_ENTITY, json!(errors)),
            },
            Err(response) => response,
        },
        (VALIDATE_PATH | SIGNUP_PATH, false) => {
            (StatusCode::METHOD_NOT_ALLOWED, json!(["method not allowed"]))
        }
        _ => (StatusCode::NOT_FOUND, json!(["not found"])),
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, (StatusCode, Value)> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            json!([format!("request body is not valid JSON: {}", e)]),
        )
    })
}

fn json_response(status: StatusCode, body: &Value) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

async fn handle(registry: Arc<Registry>, req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            log::warn!("Failed to read body of {} {}: {}", method, path, e);
            return Ok(json_response(StatusCode::BAD_REQUEST, &json!(["could not read request body"])));
        }
    };

    let (status, value) = route(&registry, &method, &path, &body);
    log::debug!("{} {} -> {}", method, path, status);
    Ok(json_response(status, &value))
}

// =============================================================================
// SignupServer
// =============================================================================

/// The sign-up backend, bound and ready to serve.
///
/// # Example
///
/// ```ignore
/// use signup_lib::{ServerConfig, SignupServer};
/// use tokio_util::sync::CancellationToken;
///
/// let server = SignupServer::bind(&ServerConfig::default()).await?;
/// server.run(CancellationToken::new()).await?;
/// ```
pub struct SignupServer {
    listener: TcpListener,
    registry: Arc<Registry>,
}

impl SignupServer {
    /// Binds the listening socket.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(config.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.addr,
                source,
            })?;

        Ok(Self {
            listener,
            registry: Arc::new(Registry::new(&config.taken_usernames)),
        })
    }

    /// Address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::LocalAddr)
    }

    /// Shared handle to the username registry.
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// Serves connections until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), ServerError> {
        log::info!("Listening on {}", self.local_addr()?);

        loop {
            let (stream, peer) = tokio::select! {
                _ = cancel.cancelled() => {
                    log::info!("Shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => accepted.map_err(ServerError::Accept)?,
            };

            let registry = Arc::clone(&self.registry);
            tokio::spawn(async move {
                let service = service_fn(move |req| handle(Arc::clone(&registry), req));
                // Clients closing early is routine.
                if let Err(e) = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await
                {
                    log::debug!("Connection from {} ended: {}", peer, e);
                }
            });
        }
    }
}

impl std::fmt::Debug for SignupServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupServer")
            .field("addr", &self.listener.local_addr().ok())
            .field("taken", &self.registry.len())
            .finish()
    }
}
