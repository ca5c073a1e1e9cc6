//! Migration: Create the per-language activity table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Languages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Languages::UserId).integer().not_null())
                    .col(ColumnDef::new(Languages::Name).string().not_null())
                    .col(
                        ColumnDef::new(Languages::Xp)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Languages::LinesNew)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Languages::LinesDel)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Languages::Files)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_languages_user_id")
                            .from(Languages::Table, Languages::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One counter row per (user, language)
        manager
            .create_index(
                Index::create()
                    .name("idx_languages_user_id_name")
                    .table(Languages::Table)
                    .col(Languages::UserId)
                    .col(Languages::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dropping the table drops its indexes as well
        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
    UserId,
    Name,
    Xp,
    LinesNew,
    LinesDel,
    Files,
}
