use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub inviter_id: String,
    pub created_at: DateTimeUtc,
    pub used_by: Option<String>,
    pub used_at: Option<DateTimeUtc>,
}

impl Model {
    /// An invite can be redeemed until someone has used it.
    pub fn is_redeemable(&self) -> bool {
        self.used_by.is_none()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::relationship::Entity")]
    Relationships,
}

impl Related<super::relationship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Relationships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
