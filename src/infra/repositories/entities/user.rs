//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Email, User};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::language::Entity")]
    Languages,
}

impl Related<super::language::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Languages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Rows are only written through `Email::parse`, so a failure here means the
/// table was edited by hand.
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let email = Email::parse(&model.email).map_err(|_| {
            AppError::internal(format!("stored email for user {} is not valid", model.id))
        })?;

        Ok(User {
            id: model.id,
            email,
            password_hash: model.password_hash,
            created_at: model.created_at,
        })
    }
}
