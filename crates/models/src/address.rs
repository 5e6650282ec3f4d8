use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{customer, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_id: i64,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Writable address columns; `customer_id` is fixed at creation and never part of an edit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

impl AddressFields {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        errors::require_present(&[&self.address_details, &self.city, &self.state, &self.pin_code])
    }
}

pub async fn create(db: &DatabaseConnection, customer_id: i64, fields: &AddressFields) -> Result<Model, errors::ModelError> {
    fields.validate()?;
    let am = ActiveModel {
        customer_id: Set(customer_id),
        address_details: Set(fields.address_details.clone()),
        city: Set(fields.city.clone()),
        state: Set(fields.state.clone()),
        pin_code: Set(fields.pin_code.clone()),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::from_db)
}
