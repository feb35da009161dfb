//! Invite lifecycle
//!
//! An invite is created by its inviter, can be looked up while unredeemed, and is
//! consumed exactly once by a redeemer, which links the two users in a relationship.
//! `Created -> Consumed` is the only transition; `Consumed` is terminal.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::store::StoreConfig;
use crate::error::{AppError, Result};
use crate::models::{invite, relationship};
use crate::schemas::InviteSummary;
use crate::services::store::{InviteStore, RedeemOutcome};

pub const MISSING_USER_ID: &str = "Missing userId";
pub const MISSING_INVITE_ID: &str = "Missing inviteId";
pub const MISSING_ACCEPT_FIELDS: &str = "Missing inviteId or userId";
pub const INVITE_NOT_FOUND: &str = "Invite not found";
pub const INVITE_ALREADY_USED: &str = "Invite already used";

/// Invite service shared by every transport binding
#[derive(Clone)]
pub struct InviteService {
    store: Arc<dyn InviteStore>,
    timeout: Duration,
}

impl InviteService {
    pub fn new(store: Arc<dyn InviteStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            timeout: config.timeout,
        }
    }

    /// Create an invite owned by `inviter_id` and return its id
    pub async fn create_invite(&self, inviter_id: &str) -> Result<String> {
        if is_blank(inviter_id) {
            return Err(AppError::InvalidInput(MISSING_USER_ID.to_string()));
        }

        let created: invite::Model = self
            .call_store("create invite", self.store.insert_invite(inviter_id))
            .await?;

        tracing::info!(invite_id = %created.id, inviter_id, "Invite created");
        Ok(created.id)
    }

    /// Look up an unredeemed invite.
    ///
    /// A consumed invite is reported as [`AppError::AlreadyUsed`]; who redeemed it is
    /// never exposed.
    pub async fn get_invite(&self, invite_id: &str) -> Result<InviteSummary> {
        if is_blank(invite_id) {
            return Err(AppError::InvalidInput(MISSING_INVITE_ID.to_string()));
        }

        let found = self
            .call_store("get invite", self.store.find_invite(invite_id))
            .await?
            .ok_or_else(|| AppError::NotFound(INVITE_NOT_FOUND.to_string()))?;

        if !found.is_redeemable() {
            tracing::debug!(invite_id, "Lookup of consumed invite refused");
            return Err(AppError::AlreadyUsed);
        }

        Ok(InviteSummary {
            invite_id: found.id,
            inviter_id: found.inviter_id,
        })
    }

    /// Redeem an invite for `invitee_id`, linking them to the inviter.
    ///
    /// The claim and the relationship insert commit together, so a consumed invite
    /// yields [`AppError::Conflict`] and never a second relationship.
    pub async fn accept_invite(
        &self,
        invite_id: &str,
        invitee_id: &str,
    ) -> Result<relationship::Model> {
        if is_blank(invite_id) || is_blank(invitee_id) {
            return Err(AppError::InvalidInput(MISSING_ACCEPT_FIELDS.to_string()));
        }

        let outcome = self
            .call_store(
                "accept invite",
                self.store.redeem_invite(invite_id, invitee_id),
            )
            .await?;

        match outcome {
            RedeemOutcome::Redeemed(created) => {
                tracing::info!(
                    invite_id,
                    relationship_id = %created.id,
                    inviter_id = %created.inviter_id,
                    invitee_id,
                    "Invite accepted"
                );
                Ok(created)
            }
            RedeemOutcome::NotFound => Err(AppError::NotFound(INVITE_NOT_FOUND.to_string())),
            RedeemOutcome::AlreadyUsed => {
                tracing::warn!(invite_id, invitee_id, "Redemption of consumed invite refused");
                Err(AppError::Conflict(INVITE_ALREADY_USED.to_string()))
            }
        }
    }

    /// Run a store call under the configured timeout, folding backend failures
    /// into [`AppError::StoreUnavailable`].
    async fn call_store<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        // On expiry the call future is dropped; an open transaction inside it
        // rolls back when its `DatabaseTransaction` is dropped.
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(AppError::Database(e))) => {
                Err(AppError::StoreUnavailable(format!("{}: {}", operation, e)))
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AppError::StoreUnavailable(format!(
                "{}: timed out after {:?}",
                operation, self.timeout
            ))),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
