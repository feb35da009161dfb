//! Migration: Create invites table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invites::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invites::InviterId).string().not_null())
                    .col(
                        ColumnDef::new(Invites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invites::UsedBy).string().null())
                    .col(
                        ColumnDef::new(Invites::UsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invites_inviter_id")
                    .table(Invites::Table)
                    .col(Invites::InviterId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invites::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Invites {
    Table,
    Id,
    #[iden = "inviter_id"]
    InviterId,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "used_by"]
    UsedBy,
    #[iden = "used_at"]
    UsedAt,
}
