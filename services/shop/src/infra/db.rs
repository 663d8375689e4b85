use anyhow::Context as _;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use sweetshop_domain::id::SweetId;
use sweetshop_domain::sweet::{Sweet, SweetFilter};
use sweetshop_domain::user::UserRole;
use sweetshop_shop_schema::{sweets, users};

use crate::domain::repository::{InventoryRepository, SweetRepository, UserRepository};
use crate::domain::types::{Credential, StockUpdate, SweetPatch};
use crate::error::ShopError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, ShopError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(credential_from_model).transpose()
    }

    async fn create(&self, credential: &Credential) -> Result<(), ShopError> {
        let result = users::ActiveModel {
            id: Set(credential.id.0),
            email: Set(credential.email.clone()),
            password_hash: Set(credential.password_hash.clone()),
            role: Set(credential.role.as_str().to_owned()),
            created_at: Set(credential.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ShopError::EmailTaken),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn credential_from_model(model: users::Model) -> Result<Credential, ShopError> {
    let role = model
        .role
        .parse::<UserRole>()
        .context("stored user role")?;
    Ok(Credential {
        id: model.id.into(),
        email: model.email,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
    })
}

// ── Sweet repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSweetRepository {
    pub db: DatabaseConnection,
}

impl SweetRepository for DbSweetRepository {
    async fn list(&self) -> Result<Vec<Sweet>, ShopError> {
        let models = sweets::Entity::find()
            .order_by_asc(sweets::Column::Id)
            .all(&self.db)
            .await
            .context("list sweets")?;
        Ok(models.into_iter().map(sweet_from_model).collect())
    }

    async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>, ShopError> {
        let models = sweets::Entity::find()
            .filter(search_condition(filter))
            .order_by_asc(sweets::Column::Id)
            .all(&self.db)
            .await
            .context("search sweets")?;
        // Non-ASCII text criteria are left out of the SQL; match them here.
        Ok(models
            .into_iter()
            .map(sweet_from_model)
            .filter(|sweet| filter.matches(sweet))
            .collect())
    }

    async fn find_by_id(&self, id: SweetId) -> Result<Option<Sweet>, ShopError> {
        let model = sweets::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find sweet by id")?;
        Ok(model.map(sweet_from_model))
    }

    async fn create(&self, sweet: &Sweet) -> Result<(), ShopError> {
        sweets::ActiveModel {
            id: Set(sweet.id.0),
            name: Set(sweet.name.clone()),
            category: Set(sweet.category.clone()),
            price: Set(sweet.price),
            quantity: Set(sweet.quantity),
        }
        .insert(&self.db)
        .await
        .context("create sweet")?;
        Ok(())
    }

    async fn update(&self, id: SweetId, patch: &SweetPatch) -> Result<Option<Sweet>, ShopError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut update = sweets::Entity::update_many();
        if let Some(ref name) = patch.name {
            update = update.col_expr(sweets::Column::Name, Expr::value(name.clone()));
        }
        if let Some(ref category) = patch.category {
            update = update.col_expr(sweets::Column::Category, Expr::value(category.clone()));
        }
        if let Some(price) = patch.price {
            update = update.col_expr(sweets::Column::Price, Expr::value(price));
        }
        if let Some(quantity) = patch.quantity {
            update = update.col_expr(sweets::Column::Quantity, Expr::value(quantity));
        }

        let result = update
            .filter(sweets::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update sweet")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: SweetId) -> Result<bool, ShopError> {
        let result = sweets::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete sweet")?;
        Ok(result.rows_affected > 0)
    }
}

/// Every present criterion ANDed. Text criteria compare lowercased values with
/// LIKE, with the user's input escaped so it matches literally.
///
/// SQLite's `LOWER()` folds ASCII only, so a non-ASCII needle is not pushed
/// down and the caller filters those rows in memory.
fn search_condition(filter: &SweetFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(name) = filter.name.as_ref().filter(|n| n.is_ascii()) {
        cond = cond.add(
            Expr::expr(Func::lower(Expr::col(sweets::Column::Name))).like(contains_pattern(name)),
        );
    }
    if let Some(category) = filter.category.as_ref().filter(|c| c.is_ascii()) {
        cond = cond.add(
            Expr::expr(Func::lower(Expr::col(sweets::Column::Category)))
                .like(contains_pattern(category)),
        );
    }
    if let Some(min) = filter.min_price {
        cond = cond.add(sweets::Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        cond = cond.add(sweets::Column::Price.lte(max));
    }
    cond
}

fn contains_pattern(needle: &str) -> LikeExpr {
    LikeExpr::new(escape_like(&needle.to_lowercase())).escape('\\')
}

/// `%needle%` with `\`, `%` and `_` escaped by a backslash.
fn escape_like(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn sweet_from_model(model: sweets::Model) -> Sweet {
    Sweet {
        id: model.id.into(),
        name: model.name,
        category: model.category,
        price: model.price,
        quantity: model.quantity,
    }
}

// ── Inventory repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInventoryRepository {
    pub db: DatabaseConnection,
}

impl DbInventoryRepository {
    /// Tell an unmatched conditional update apart: row gone vs. condition failed.
    async fn classify_miss(&self, id: SweetId) -> Result<StockUpdate, ShopError> {
        let exists = sweets::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find sweet for stock update")?
            .is_some();
        Ok(if exists {
            StockUpdate::Insufficient
        } else {
            StockUpdate::Missing
        })
    }
}

impl InventoryRepository for DbInventoryRepository {
    async fn decrement(&self, id: SweetId) -> Result<StockUpdate, ShopError> {
        let result = sweets::Entity::update_many()
            .col_expr(
                sweets::Column::Quantity,
                Expr::col(sweets::Column::Quantity).sub(1),
            )
            .filter(sweets::Column::Id.eq(id.0))
            .filter(sweets::Column::Quantity.gt(0))
            .exec(&self.db)
            .await
            .context("decrement stock")?;
        if result.rows_affected > 0 {
            return Ok(StockUpdate::Applied);
        }
        self.classify_miss(id).await
    }

    async fn increment(&self, id: SweetId, amount: i32) -> Result<StockUpdate, ShopError> {
        let result = sweets::Entity::update_many()
            .col_expr(
                sweets::Column::Quantity,
                Expr::col(sweets::Column::Quantity).add(amount),
            )
            .filter(sweets::Column::Id.eq(id.0))
            .filter(sweets::Column::Quantity.lte(i32::MAX.saturating_sub(amount)))
            .exec(&self.db)
            .await
            .context("increment stock")?;
        if result.rows_affected > 0 {
            return Ok(StockUpdate::Applied);
        }
        self.classify_miss(id).await
    }
}
