use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde_json::json;
use uuid::Uuid;

use models::order::{self, Model as Order, OrderStatus};

use crate::errors::ServiceError;
use crate::order::repository::{OrderRepository, STALE_ORDER};
use crate::pagination::{Page, Pagination};

/// SeaORM-backed repository implementation.
pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

/// JSONB containment on the embedded items array.
fn items_contain(item: serde_json::Value) -> sea_orm::sea_query::SimpleExpr {
    Expr::cust_with_values(r#""items" @> ?"#, [json!([item])])
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn insert(&self, o: Order) -> Result<Order, ServiceError> {
        let am: order::ActiveModel = o.into();
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, o: Order) -> Result<Order, ServiceError> {
        let expected = o.version;
        let next = Order { version: expected + 1, ..o };
        let res = order::Entity::update_many()
            .set(order::ActiveModel::from(next.clone()).reset_all())
            .filter(order::Column::Id.eq(next.id))
            .filter(order::Column::Version.eq(expected))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return match order::Entity::find_by_id(next.id).one(&self.db).await? {
                Some(_) => Err(ServiceError::conflict(STALE_ORDER)),
                None => Err(ServiceError::not_found("order")),
            };
        }
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = order::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, ServiceError> {
        Ok(order::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list(&self, page: Pagination, status: Option<OrderStatus>) -> Result<Page<Order>, ServiceError> {
        let (idx, per_page) = page.normalize();
        let mut query = order::Entity::find();
        if let Some(s) = status {
            query = query.filter(order::Column::Status.eq(s.as_str()));
        }
        let paginator = query.order_by_desc(order::Column::CreatedAt).paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(idx).await?;
        Ok(Page::new(items, page, total))
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, ServiceError> {
        Ok(order::Entity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_desc(order::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn list_assigned(&self, staff_id: Uuid) -> Result<Vec<Order>, ServiceError> {
        let cond = Condition::any()
            .add(items_contain(json!({ "cutting_master_id": staff_id })))
            .add(items_contain(json!({ "tailor_id": staff_id })));
        Ok(order::Entity::find()
            .filter(cond)
            .order_by_desc(order::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn count_by_customer(&self, customer_id: Uuid) -> Result<u64, ServiceError> {
        Ok(order::Entity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .count(&self.db)
            .await?)
    }
}
