//! One-shot request binding for serverless deployments.
//!
//! A function runtime hands over one HTTP request per invocation. The store
//! connection is opened on the first invocation and reused while the instance
//! stays warm; routing, validation and error mapping are the same router the
//! server binding uses.

use axum::{body::Body, response::IntoResponse, response::Response, Router};
use http::{Method, Request};
use tokio::sync::OnceCell;
use tower::ServiceExt;

use crate::bootstrapper::init_tracing;
use crate::config::CONFIG;
use crate::db;
use crate::endpoints::create_router;
use crate::error::AppError;
use crate::middleware::cors::{apply_cors_headers, preflight_response};
use crate::state::AppState;

static INSTANCE: OnceCell<InviteFunction> = OnceCell::const_new();

/// A warm function instance
#[derive(Clone)]
pub struct InviteFunction {
    router: Router,
}

impl InviteFunction {
    pub fn new(state: AppState) -> Self {
        Self {
            router: create_router(state),
        }
    }

    /// Cold start: load configuration and connect the store
    pub async fn from_env() -> crate::error::Result<Self> {
        dotenvy::dotenv().ok();
        init_tracing();

        let conn = db::connect().await?;
        tracing::info!("Function instance initialized");
        Ok(Self::new(AppState::from_db(conn, &CONFIG.store)))
    }

    /// Serve a single request
    pub async fn handle(&self, req: Request<Body>) -> Response {
        match self.router.clone().oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

/// Entry point for the function runtime
pub async fn handle(req: Request<Body>) -> Response {
    // Pre-flight never needs the store
    if req.method() == Method::OPTIONS {
        return preflight_response();
    }

    match INSTANCE.get_or_try_init(InviteFunction::from_env).await {
        Ok(instance) => instance.handle(req).await,
        Err(e) => {
            let mut response = AppError::Internal(format!("Function init failed: {}", e))
                .into_response();
            apply_cors_headers(response.headers_mut());
            response
        }
    }
}
