use sea_orm::{entity::prelude::*, DatabaseConnection, FromQueryResult, Set};
use serde::{Deserialize, Serialize};

use crate::{address, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Addresses,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Addresses => Entity::has_many(address::Entity).into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef { Relation::Addresses.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Writable customer columns, as submitted by a client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl CustomerFields {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        errors::require_present(&[&self.first_name, &self.last_name, &self.phone_number])
    }
}

/// List row: a customer plus the live number of addresses it owns.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address_count: i64,
}

/// Single-customer view with every owned address attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Model,
    pub addresses: Vec<address::Model>,
}

pub async fn create(db: &DatabaseConnection, fields: &CustomerFields) -> Result<Model, errors::ModelError> {
    fields.validate()?;
    let am = ActiveModel {
        first_name: Set(fields.first_name.clone()),
        last_name: Set(fields.last_name.clone()),
        phone_number: Set(fields.phone_number.clone()),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::from_db)
}
