//! Store seam for invites and relationships.
//!
//! [`InviteStore`] is what the invite service talks to; [`DbInviteStore`] is the
//! sea-orm implementation used by both HTTP bindings.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};

use crate::db::DbConn;
use crate::error::Result;
use crate::models::prelude::*;
use crate::models::{invite, relationship};
use crate::services::ids::generate_document_id;

/// Result of a redemption attempt
#[derive(Debug, Clone, PartialEq)]
pub enum RedeemOutcome {
    /// The invite was consumed and this relationship was created.
    Redeemed(relationship::Model),
    /// No invite with that id exists.
    NotFound,
    /// The invite had already been consumed; nothing was written.
    AlreadyUsed,
}

#[async_trait]
pub trait InviteStore: Send + Sync {
    /// Persist a new unredeemed invite with a store-assigned id and timestamp.
    async fn insert_invite(&self, inviter_id: &str) -> Result<invite::Model>;

    async fn find_invite(&self, invite_id: &str) -> Result<Option<invite::Model>>;

    /// Consume the invite and create the relationship as one atomic unit.
    ///
    /// Must only succeed while `used_by` is unset, so at most one caller can
    /// ever observe [`RedeemOutcome::Redeemed`] for a given invite.
    async fn redeem_invite(&self, invite_id: &str, invitee_id: &str) -> Result<RedeemOutcome>;
}

/// sea-orm backed store
#[derive(Clone)]
pub struct DbInviteStore {
    db: DbConn,
}

impl DbInviteStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InviteStore for DbInviteStore {
    async fn insert_invite(&self, inviter_id: &str) -> Result<invite::Model> {
        let new_invite = invite::ActiveModel {
            id: Set(generate_document_id()),
            inviter_id: Set(inviter_id.to_string()),
            created_at: Set(Utc::now()),
            used_by: Set(None),
            used_at: Set(None),
        };

        Ok(new_invite.insert(&self.db).await?)
    }

    async fn find_invite(&self, invite_id: &str) -> Result<Option<invite::Model>> {
        Ok(Invite::find_by_id(invite_id.to_string())
            .one(&self.db)
            .await?)
    }

    async fn redeem_invite(&self, invite_id: &str, invitee_id: &str) -> Result<RedeemOutcome> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        // Claim first so the write lock is taken by the opening statement; a
        // concurrent redeemer waits on it and then matches zero rows.
        let claimed = Invite::update_many()
            .col_expr(invite::Column::UsedBy, Expr::value(invitee_id.to_string()))
            .col_expr(invite::Column::UsedAt, Expr::value(now))
            .filter(invite::Column::Id.eq(invite_id))
            .filter(invite::Column::UsedBy.is_null())
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            let exists = Invite::find_by_id(invite_id.to_string())
                .one(&txn)
                .await?
                .is_some();
            txn.rollback().await?;
            return Ok(if exists {
                RedeemOutcome::AlreadyUsed
            } else {
                RedeemOutcome::NotFound
            });
        }

        let Some(claimed_invite) = Invite::find_by_id(invite_id.to_string()).one(&txn).await?
        else {
            txn.rollback().await?;
            return Ok(RedeemOutcome::NotFound);
        };

        let new_relationship = relationship::ActiveModel {
            id: Set(generate_document_id()),
            inviter_id: Set(claimed_invite.inviter_id),
            invitee_id: Set(invitee_id.to_string()),
            invite_id: Set(claimed_invite.id),
            created_at: Set(now),
        };
        let created = new_relationship.insert(&txn).await?;

        txn.commit().await?;

        Ok(RedeemOutcome::Redeemed(created))
    }
}
