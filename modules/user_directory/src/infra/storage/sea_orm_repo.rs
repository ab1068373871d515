//! SeaORM-backed repository implementation for the domain port.

use anyhow::Context;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::{debug, instrument};

use crate::contract::model::{User, UsersFilter};
use crate::domain::repo::{NewUserRecord, UserChanges, UsersRepository};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};
use crate::infra::storage::mapper::search_key;

pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Escape LIKE wildcards so the user's text is matched literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Substring match against a lowercased `*_key` column.
fn contains_ignore_case(key_col: Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    let pattern = format!("%{}%", escape_like(&search_key(needle)));
    Expr::col((UserEntity, key_col)).like(LikeExpr::new(pattern).escape('\\'))
}

fn filter_condition(filter: &UsersFilter) -> Condition {
    let mut cond = Condition::all();
    for (col, value) in [
        (Column::NameKey, &filter.name),
        (Column::SurnameKey, &filter.surname),
        (Column::PatronymicKey, &filter.patronymic),
    ] {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            cond = cond.add(contains_ignore_case(col, v));
        }
    }
    if let Some(gender) = filter.gender {
        cond = cond.add(Column::Gender.eq(gender.as_str()));
    }
    cond
}

#[async_trait::async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    #[instrument(
        name = "user_directory.repo.find_by_id",
        skip(self),
        fields(db.operation = "SELECT", user.id = id)
    )]
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find_by_id query failed")?;
        Ok(found.map(Into::into))
    }

    #[instrument(
        name = "user_directory.repo.exists_by_id",
        skip(self),
        fields(db.operation = "SELECT COUNT", user.id = id)
    )]
    async fn exists_by_id(&self, id: i32) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await
            .context("exists_by_id query failed")?;
        Ok(count > 0)
    }

    #[instrument(
        name = "user_directory.repo.exists_by_full_name",
        skip(self),
        fields(db.operation = "SELECT COUNT")
    )]
    async fn exists_by_full_name(
        &self,
        name: &str,
        surname: &str,
        patronymic: &str,
    ) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .filter(
                Condition::all()
                    .add(Column::Name.eq(name))
                    .add(Column::Surname.eq(surname))
                    .add(Column::Patronymic.eq(patronymic)),
            )
            .count(&self.db)
            .await
            .context("exists_by_full_name query failed")?;
        Ok(count > 0)
    }

    #[instrument(
        name = "user_directory.repo.insert",
        skip(self, record),
        fields(db.operation = "INSERT")
    )]
    async fn insert(&self, record: NewUserRecord) -> anyhow::Result<User> {
        let am: UserAM = record.into();
        let model = am.insert(&self.db).await.context("insert failed")?;
        debug!(user.id = model.id, "Inserted user");
        Ok(model.into())
    }

    #[instrument(
        name = "user_directory.repo.update_patch",
        skip(self, changes),
        fields(db.operation = "UPDATE", user.id = id)
    )]
    async fn update_patch(&self, id: i32, changes: UserChanges) -> anyhow::Result<bool> {
        let am: UserAM = changes.into();
        let res = UserEntity::update_many()
            .set(am)
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update query failed")?;
        Ok(res.rows_affected > 0)
    }

    #[instrument(
        name = "user_directory.repo.delete",
        skip(self),
        fields(db.operation = "DELETE", user.id = id)
    )]
    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete query failed")?;
        Ok(res.rows_affected > 0)
    }

    #[instrument(
        name = "user_directory.repo.list_page",
        skip(self, filter),
        fields(db.operation = "SELECT")
    )]
    async fn list_page(
        &self,
        filter: &UsersFilter,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<(Vec<User>, u64)> {
        let cond = filter_condition(filter);

        // Page and count must agree, so both run in one transaction
        let txn = self.db.begin().await.context("begin transaction failed")?;

        let rows = UserEntity::find()
            .filter(cond.clone())
            .order_by_asc(Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&txn)
            .await
            .context("list query failed")?;

        let total = UserEntity::find()
            .filter(cond)
            .count(&txn)
            .await
            .context("count query failed")?;

        txn.commit().await.context("commit failed")?;

        debug!(total, returned = rows.len(), "Listed users page");
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}
