use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use models::customer::{self, Model as Customer};

use crate::customer::domain::SearchField;
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

/// `%query%` with LIKE wildcards in the query escaped.
fn like_pattern(query: &str) -> String {
    let escaped = query.to_lowercase().replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

fn lower_like(col: customer::Column, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(pattern)
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn insert(&self, c: Customer) -> Result<Customer, ServiceError> {
        let am: customer::ActiveModel = c.into();
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, c: Customer) -> Result<Customer, ServiceError> {
        let am = customer::ActiveModel::from(c).reset_all();
        Ok(am.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        Ok(customer::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, ServiceError> {
        Ok(customer::Entity::find()
            .filter(customer::Column::Name.eq(name.to_string()))
            .one(&self.db)
            .await?)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, ServiceError> {
        Ok(customer::Entity::find()
            .filter(
                Condition::any()
                    .add(customer::Column::PhoneNumber.eq(phone.to_string()))
                    .add(customer::Column::AlternatePhoneNumber.eq(phone.to_string())),
            )
            .one(&self.db)
            .await?)
    }

    async fn list(&self, page: Pagination) -> Result<Page<Customer>, ServiceError> {
        let (idx, per_page) = page.normalize();
        let paginator = customer::Entity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(idx).await?;
        Ok(Page::new(items, page, total))
    }

    async fn search(&self, query: &str, field: SearchField) -> Result<Vec<Customer>, ServiceError> {
        let pattern = like_pattern(query);
        let by_phone = Condition::any()
            .add(lower_like(customer::Column::PhoneNumber, &pattern))
            .add(lower_like(customer::Column::AlternatePhoneNumber, &pattern));
        let cond = match field {
            SearchField::Name => Condition::all().add(lower_like(customer::Column::Name, &pattern)),
            SearchField::Phone => by_phone,
            SearchField::Any => by_phone.add(lower_like(customer::Column::Name, &pattern)),
        };
        Ok(customer::Entity::find()
            .filter(cond)
            .order_by_desc(customer::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
