use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Product: owner lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_product_user")
                    .table(Product::Table)
                    .col(Product::UserId)
                    .to_owned(),
            )
            .await?;

        // ProductImage: loaded per product on every read
        manager
            .create_index(
                Index::create()
                    .name("idx_product_image_product")
                    .table(ProductImage::Table)
                    .col(ProductImage::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_image_product").table(ProductImage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_user").table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, UserId }

#[derive(DeriveIden)]
enum ProductImage { Table, ProductId }
