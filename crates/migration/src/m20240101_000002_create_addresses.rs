//! Create `addresses` table.
//!
//! Owned by a customer; removed together with it through the cascading foreign key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_auto(Addresses::Id))
                    .col(integer(Addresses::CustomerId).not_null())
                    .col(text(Addresses::AddressDetails).not_null())
                    .col(text(Addresses::City).not_null())
                    .col(text(Addresses::State).not_null())
                    .col(text(Addresses::PinCode).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_customer")
                            .from(Addresses::Table, Addresses::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Addresses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Addresses { Table, Id, CustomerId, AddressDetails, City, State, PinCode }

#[derive(DeriveIden)]
enum Customers { Table, Id }
