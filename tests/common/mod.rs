//! Test helpers and utilities for integration testing.
//!
//! Builds in-memory SQLite stores, app state around them, and stores that fail
//! or stall on purpose for the error paths.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use sea_orm::{ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

use invitelink::config::store::StoreConfig;
use invitelink::error::{AppError, Result};
use invitelink::migrations::Migrator;
use invitelink::models::prelude::*;
use invitelink::models::{invite, relationship};
use invitelink::services::{DbInviteStore, InviteService, InviteStore, RedeemOutcome};
use invitelink::state::AppState;

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    // Use simple in-memory SQLite - each connection gets its own database
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    // Run migrations using the Migrator
    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

/// Invite service over a fresh database, plus the connection for direct inspection
pub async fn create_test_service() -> (InviteService, DatabaseConnection) {
    let db = create_test_db().await;
    let store = Arc::new(DbInviteStore::new(db.clone()));
    (InviteService::new(store, &StoreConfig::default()), db)
}

/// Invite service over a file-backed SQLite database with a real connection pool.
///
/// Keep the returned `TempDir` alive for as long as the database is used.
pub async fn create_file_backed_service(
    max_connections: u32,
) -> (InviteService, DatabaseConnection, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("invites.db").display());
    let db = invitelink::db::connect_with_url(&url, max_connections)
        .await
        .expect("Failed to open file-backed database");

    let store = Arc::new(DbInviteStore::new(db.clone()));
    (InviteService::new(store, &StoreConfig::default()), db, dir)
}

/// Relationships recorded against an invite
pub async fn relationships_for_invite(
    db: &DatabaseConnection,
    invite_id: &str,
) -> Vec<relationship::Model> {
    Relationship::find()
        .filter(relationship::Column::InviteId.eq(invite_id))
        .all(db)
        .await
        .unwrap()
}

/// App state over a fresh database
pub async fn build_test_app_state() -> (AppState, DatabaseConnection) {
    let db = create_test_db().await;
    (AppState::from_db(db.clone(), &StoreConfig::default()), db)
}

/// App state over an arbitrary store with a short timeout
pub fn build_test_app_state_with_store(store: Arc<dyn InviteStore>) -> AppState {
    AppState::with_store(store, &short_timeout())
}

pub fn short_timeout() -> StoreConfig {
    StoreConfig {
        timeout: Duration::from_millis(50),
    }
}

/// Store whose every call fails like a dropped connection
pub struct FailingStore;

fn connection_lost() -> AppError {
    AppError::Database(DbErr::Custom("connection reset by peer".to_string()))
}

#[async_trait]
impl InviteStore for FailingStore {
    async fn insert_invite(&self, _inviter_id: &str) -> Result<invite::Model> {
        Err(connection_lost())
    }

    async fn find_invite(&self, _invite_id: &str) -> Result<Option<invite::Model>> {
        Err(connection_lost())
    }

    async fn redeem_invite(&self, _invite_id: &str, _invitee_id: &str) -> Result<RedeemOutcome> {
        Err(connection_lost())
    }
}

/// Store that never answers within the test timeout
pub struct StalledStore;

async fn stall() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

#[async_trait]
impl InviteStore for StalledStore {
    async fn insert_invite(&self, _inviter_id: &str) -> Result<invite::Model> {
        stall().await;
        Err(connection_lost())
    }

    async fn find_invite(&self, _invite_id: &str) -> Result<Option<invite::Model>> {
        stall().await;
        Ok(None)
    }

    async fn redeem_invite(&self, _invite_id: &str, _invitee_id: &str) -> Result<RedeemOutcome> {
        stall().await;
        Ok(RedeemOutcome::NotFound)
    }
}

/// Build a JSON POST request
pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bodiless request
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

/// Split a response into status and parsed JSON body (Null when empty)
pub async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };
    (status, value)
}
