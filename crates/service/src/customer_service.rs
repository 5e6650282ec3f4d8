use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, instrument};

use models::address;
use models::customer::{self, CustomerDetail, CustomerFields, CustomerSummary};
use crate::{errors::ServiceError, pagination::Pagination};

const ADDRESS_COUNT_SQL: &str =
    "(SELECT COUNT(*) FROM addresses WHERE addresses.customer_id = customers.id)";

/// Optional substring filters matched against a customer's addresses.
#[derive(Clone, Debug, Default)]
pub struct CustomerFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

impl CustomerFilter {
    /// Non-blank filters as (address column, needle) pairs, in a fixed order.
    pub fn predicates(&self) -> Vec<(address::Column, &str)> {
        [
            (address::Column::City, self.city.as_deref()),
            (address::Column::State, self.state.as_deref()),
            (address::Column::PinCode, self.pin_code.as_deref()),
        ]
        .into_iter()
        .filter_map(|(col, v)| v.filter(|s| !s.is_empty()).map(|s| (col, s)))
        .collect()
    }
}

/// Create a customer.
pub async fn create_customer(db: &DatabaseConnection, fields: &CustomerFields) -> Result<customer::Model, ServiceError> {
    Ok(customer::create(db, fields).await?)
}

/// List customers newest first, each row carrying its address count.
///
/// Every filter becomes `customers.id IN (SELECT customer_id FROM addresses
/// WHERE <col> LIKE '%needle%')`; all of them must hold.
#[instrument(skip(db))]
pub async fn list_customers(
    db: &DatabaseConnection,
    filter: &CustomerFilter,
    page: Pagination,
) -> Result<Vec<CustomerSummary>, ServiceError> {
    let mut select = customer::Entity::find().column_as(Expr::cust(ADDRESS_COUNT_SQL), "address_count");
    for (column, needle) in filter.predicates() {
        let owners = Query::select()
            .column(address::Column::CustomerId)
            .from(address::Entity)
            .and_where(Expr::col(column).like(format!("%{needle}%")))
            .to_owned();
        select = select.filter(customer::Column::Id.in_subquery(owners));
    }
    let rows = select
        .order_by_desc(customer::Column::Id)
        .limit(page.limit)
        .offset(page.offset())
        .into_model::<CustomerSummary>()
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    debug!(count = rows.len(), "listed customers");
    Ok(rows)
}

/// Get a customer together with all of its addresses.
pub async fn get_customer(db: &DatabaseConnection, id: i64) -> Result<CustomerDetail, ServiceError> {
    let found = customer::Entity::find_by_id(id)
        .one(db).await.map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("Customer"))?;
    let addresses = address::Entity::find()
        .filter(address::Column::CustomerId.eq(id))
        .order_by_asc(address::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(CustomerDetail { customer: found, addresses })
}

/// Replace all writable columns of a customer.
pub async fn update_customer(db: &DatabaseConnection, id: i64, fields: &CustomerFields) -> Result<customer::Model, ServiceError> {
    fields.validate()?;
    let mut am: customer::ActiveModel = customer::Entity::find_by_id(id)
        .one(db).await.map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("Customer"))?
        .into();
    am.first_name = Set(fields.first_name.clone());
    am.last_name = Set(fields.last_name.clone());
    am.phone_number = Set(fields.phone_number.clone());
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    Ok(updated)
}

/// Delete a customer; its addresses go with it through the cascading foreign key.
pub async fn delete_customer(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let res = customer::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::db)?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Customer"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_service::create_address;
    use crate::test_support::{get_db, sample_address, sample_customer};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn customer_crud_service() -> Result<(), anyhow::Error> {
        let t = get_db().await?;

        let c = create_customer(&t.db, &sample_customer("Asha", "Rao", "9000000001")).await?;
        let found = get_customer(&t.db, c.id).await?;
        assert_eq!(found.customer, c);
        assert!(found.addresses.is_empty());

        let changed = sample_customer("Asha", "Kulkarni", "9000000002");
        let updated = update_customer(&t.db, c.id, &changed).await?;
        assert_eq!(updated.id, c.id);
        assert_eq!(updated.last_name, "Kulkarni");
        assert_eq!(get_customer(&t.db, c.id).await?.customer.phone_number, "9000000002");

        delete_customer(&t.db, c.id).await?;
        assert!(matches!(get_customer(&t.db, c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_phone_fails_on_create_and_update() -> Result<(), anyhow::Error> {
        let t = get_db().await?;
        create_customer(&t.db, &sample_customer("A", "One", "111")).await?;
        let other = create_customer(&t.db, &sample_customer("B", "Two", "222")).await?;

        let err = create_customer(&t.db, &sample_customer("C", "Three", "111")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Constraint(_)), "got {err:?}");

        let err = update_customer(&t.db, other.id, &sample_customer("B", "Two", "111")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Constraint(_)), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let t = get_db().await?;
        let err = update_customer(&t.db, 999, &sample_customer("X", "Y", "1")).await.unwrap_err();
        assert_eq!(err.to_string(), "Customer not found");
        assert!(matches!(delete_customer(&t.db, 999).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(get_customer(&t.db, 999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_validates_before_lookup() -> Result<(), anyhow::Error> {
        let t = get_db().await?;
        let err = update_customer(&t.db, 999, &sample_customer("", "Y", "1")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_to_addresses() -> Result<(), anyhow::Error> {
        let t = get_db().await?;
        let c = create_customer(&t.db, &sample_customer("Ravi", "K", "333")).await?;
        create_address(&t.db, c.id, &sample_address("Pune")).await?;
        create_address(&t.db, c.id, &sample_address("Mumbai")).await?;

        delete_customer(&t.db, c.id).await?;
        let orphans = address::Entity::find()
            .filter(address::Column::CustomerId.eq(c.id))
            .count(&t.db)
            .await?;
        assert_eq!(orphans, 0);
        Ok(())
    }

    #[tokio::test]
    async fn list_orders_newest_first_with_counts() -> Result<(), anyhow::Error> {
        let t = get_db().await?;
        let a = create_customer(&t.db, &sample_customer("A", "A", "1")).await?;
        let b = create_customer(&t.db, &sample_customer("B", "B", "2")).await?;
        create_address(&t.db, a.id, &sample_address("Pune")).await?;
        create_address(&t.db, a.id, &sample_address("Nashik")).await?;

        let rows = list_customers(&t.db, &CustomerFilter::default(), Pagination::default()).await?;
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
        assert_eq!(rows[0].address_count, 0);
        assert_eq!(rows[1].address_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_city_case_insensitively() -> Result<(), anyhow::Error> {
        let t = get_db().await?;
        let both = create_customer(&t.db, &sample_customer("Meera", "S", "10")).await?;
        create_address(&t.db, both.id, &sample_address("Pune")).await?;
        create_address(&t.db, both.id, &sample_address("Mumbai")).await?;
        let elsewhere = create_customer(&t.db, &sample_customer("Karan", "T", "11")).await?;
        create_address(&t.db, elsewhere.id, &sample_address("Delhi")).await?;
        create_customer(&t.db, &sample_customer("Nobody", "U", "12")).await?;

        let filter = CustomerFilter { city: Some("pune".into()), ..Default::default() };
        let rows = list_customers(&t.db, &filter, Pagination::default()).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, both.id);
        // the count covers every address, not only the matching ones
        assert_eq!(rows[0].address_count, 2);

        let filter = CustomerFilter {
            city: Some("un".into()),
            pin_code: Some("4110".into()),
            ..Default::default()
        };
        let rows = list_customers(&t.db, &filter, Pagination::default()).await?;
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![both.id]);

        let filter = CustomerFilter { state: Some("Goa".into()), ..Default::default() };
        assert!(list_customers(&t.db, &filter, Pagination::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_pages_with_offset() -> Result<(), anyhow::Error> {
        let t = get_db().await?;
        for i in 0..5 {
            create_customer(&t.db, &sample_customer("P", "Q", &format!("70{i}"))).await?;
        }
        let page2 = Pagination::parse(Some("2"), Some("2"))?;
        let rows = list_customers(&t.db, &CustomerFilter::default(), page2).await?;
        let phones: Vec<&str> = rows.iter().map(|r| r.phone_number.as_str()).collect();
        assert_eq!(phones, vec!["702", "701"]);

        let past_end = Pagination::parse(Some("4"), Some("2"))?;
        assert!(list_customers(&t.db, &CustomerFilter::default(), past_end).await?.is_empty());
        Ok(())
    }

    #[test]
    fn blank_filters_produce_no_predicates() {
        let filter = CustomerFilter { city: Some(String::new()), state: None, pin_code: Some("41".into()) };
        let preds = filter.predicates();
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].1, "41");
    }
}
