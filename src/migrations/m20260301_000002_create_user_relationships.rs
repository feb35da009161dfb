//! Migration: Create user_relationships table

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_invites::Invites;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRelationships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRelationships::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserRelationships::InviterId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRelationships::InviteeId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRelationships::InviteId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRelationships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_relationships_invite_id")
                            .from(UserRelationships::Table, UserRelationships::InviteId)
                            .to(Invites::Table, Invites::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // No unique index on (inviter_id, invitee_id): repeated pairs are allowed.
        for (name, column) in [
            ("idx_user_relationships_invite_id", UserRelationships::InviteId),
            ("idx_user_relationships_inviter_id", UserRelationships::InviterId),
            ("idx_user_relationships_invitee_id", UserRelationships::InviteeId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(UserRelationships::Table)
                        .col(column)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(UserRelationships::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum UserRelationships {
    Table,
    Id,
    #[iden = "inviter_id"]
    InviterId,
    #[iden = "invitee_id"]
    InviteeId,
    #[iden = "invite_id"]
    InviteId,
    #[iden = "created_at"]
    CreatedAt,
}
