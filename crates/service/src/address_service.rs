use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use models::address::{self, AddressFields};
use crate::errors::ServiceError;

/// Add an address to a customer. An unknown customer surfaces as a foreign key violation.
pub async fn create_address(db: &DatabaseConnection, customer_id: i64, fields: &AddressFields) -> Result<address::Model, ServiceError> {
    Ok(address::create(db, customer_id, fields).await?)
}

/// All addresses owned by a customer, oldest first. Unknown customers yield an empty list.
pub async fn list_addresses(db: &DatabaseConnection, customer_id: i64) -> Result<Vec<address::Model>, ServiceError> {
    address::Entity::find()
        .filter(address::Column::CustomerId.eq(customer_id))
        .order_by_asc(address::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// Replace the writable columns of an address; its owner never changes.
pub async fn update_address(db: &DatabaseConnection, id: i64, fields: &AddressFields) -> Result<address::Model, ServiceError> {
    fields.validate()?;
    let mut am: address::ActiveModel = address::Entity::find_by_id(id)
        .one(db).await.map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("Address"))?
        .into();
    am.address_details = Set(fields.address_details.clone());
    am.city = Set(fields.city.clone());
    am.state = Set(fields.state.clone());
    am.pin_code = Set(fields.pin_code.clone());
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    Ok(updated)
}

/// Delete an address.
pub async fn delete_address(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let res = address::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::db)?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Address"));
    }
    Ok(())
}
