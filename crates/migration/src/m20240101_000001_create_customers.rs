//! Create `customers` table.
//!
//! Root entity; `phone_number` is unique across all customers. The id is the
//! sqlite rowid (`INTEGER PRIMARY KEY`), a 64-bit value.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_auto(Customers::Id))
                    .col(text(Customers::FirstName).not_null())
                    .col(text(Customers::LastName).not_null())
                    .col(text(Customers::PhoneNumber).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customers { Table, Id, FirstName, LastName, PhoneNumber }
