use std::sync::Arc;

use crate::config::store::StoreConfig;
use crate::db::DbConn;
use crate::services::{DbInviteStore, InviteService, InviteStore};

/// Application state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub invites: InviteService,
}

impl AppState {
    pub fn new(invites: InviteService) -> Self {
        Self { invites }
    }

    /// State backed by any store implementation
    pub fn with_store(store: Arc<dyn InviteStore>, config: &StoreConfig) -> Self {
        Self::new(InviteService::new(store, config))
    }

    /// State backed by the database store
    pub fn from_db(db: DbConn, config: &StoreConfig) -> Self {
        Self::with_store(Arc::new(DbInviteStore::new(db)), config)
    }
}
