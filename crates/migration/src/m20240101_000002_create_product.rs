//! Create `product` table with a nullable FK to `user` (the last editor).
//!
//! Title and slug are unique; price and stock are guarded by CHECK constraints.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(text(Product::Title).unique_key())
                    .col(
                        double(Product::Price)
                            .default(0.0)
                            .check(Expr::col(Product::Price).gte(0.0)),
                    )
                    .col(text_null(Product::Description))
                    .col(text(Product::Slug).unique_key())
                    .col(
                        integer(Product::Stock)
                            .default(0)
                            .check(Expr::col(Product::Stock).gte(0)),
                    )
                    .col(ColumnDef::new(Product::Sizes).array(ColumnType::Text).not_null())
                    .col(text(Product::Gender))
                    .col(
                        ColumnDef::new(Product::Tags)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'::text[]")),
                    )
                    .col(uuid_null(Product::UserId))
                    .col(timestamp_with_time_zone(Product::CreatedAt))
                    .col(timestamp_with_time_zone(Product::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_user")
                            .from(Product::Table, Product::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Title,
    Price,
    Description,
    Slug,
    Stock,
    Sizes,
    Gender,
    Tags,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
