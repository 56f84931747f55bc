use std::{fmt::Display, marker::PhantomData};

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, IdenStatic, IntoActiveModel, Iterable,
    PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter, QuerySelect, TryIntoModel,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as Json;

/// Default page size for [`CrudRepository::get_all`] and [`CrudRepository::filter`].
pub const DEFAULT_LIMIT: u64 = 100;

/// Largest `skip` or `limit` accepted by the listing queries, values are bound as signed
/// 64-bit integers.
pub const MAX_PAGE_BOUND: u64 = i64::MAX as u64;

/// Generic create, read, update & delete operations for any entity `E`.
///
/// Works with a plain connection as well as inside a transaction, any [`ConnectionTrait`]
/// will do. Failures are logged with the entity's table name and returned unchanged.
pub struct CrudRepository<'a, C: ConnectionTrait, E: EntityTrait> {
    db: &'a C,
    entity: PhantomData<E>,
}

impl<'a, C, E> CrudRepository<'a, C, E>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    /// Creates a new instance of [`CrudRepository`]
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    fn entity_name() -> String {
        E::default().table_name().to_string()
    }

    /// Inserts or updates a record.
    ///
    /// The record is inserted when its primary key is not set and updated otherwise. The
    /// stored row, including generated values such as the ID, is returned.
    pub async fn save(&self, model: E::ActiveModel) -> Result<E::Model, DbErr>
    where
        E::ActiveModel: ActiveModelBehavior + TryIntoModel<E::Model> + Send,
        E::Model: IntoActiveModel<E::ActiveModel>,
    {
        let name = Self::entity_name();

        let result = match model.save(self.db).await {
            Ok(saved) => saved.try_into_model(),
            Err(e) => Err(e),
        };

        match result {
            Ok(model) => {
                tracing::info!("{} record added/updated", name);

                Ok(model)
            }
            Err(e) => {
                tracing::error!("Failed to save {} record: {}", name, e);

                Err(e)
            }
        }
    }

    /// Updates the fields of `model` present in the `data` JSON object, then saves it.
    ///
    /// Keys that are not columns of the entity are logged and ignored, as are primary key
    /// columns.
    ///
    /// # Returns
    /// - `Ok(Model)` - The updated record
    /// - `Err(DbErr::Custom)` - `data` is not a JSON object
    /// - `Err(DbErr::Json)` - A value does not fit the type of its column
    /// - `Err(DbErr)` - The update query failed
    pub async fn update(&self, model: E::Model, data: Json) -> Result<E::Model, DbErr>
    where
        E::ActiveModel: ActiveModelBehavior + TryIntoModel<E::Model> + Send,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + DeserializeOwned,
    {
        let name = Self::entity_name();

        let Json::Object(fields) = data else {
            return Err(DbErr::Custom(format!(
                "Update data for {} must be a JSON object",
                name
            )));
        };

        let primary_keys: Vec<&'static str> = E::PrimaryKey::iter()
            .map(|pk| pk.into_column().as_str())
            .collect();

        let mut merged = serde_json::to_value(&model).map_err(|e| DbErr::Json(e.to_string()))?;
        let mut changed = Vec::new();

        for (key, value) in fields {
            if primary_keys.contains(&key.as_str()) {
                tracing::info!(
                    "Field '{}' is a primary key of {} and will be ignored",
                    key,
                    name
                );
                continue;
            }

            let Some(column) = E::Column::iter().find(|c| c.as_str() == key) else {
                tracing::info!(
                    "Field '{}' does not exist on {} and will be ignored",
                    key,
                    name
                );
                continue;
            };

            merged[key.as_str()] = value;
            changed.push(column);
        }

        if changed.is_empty() {
            tracing::info!("No fields of {} record changed, skipping update", name);

            return Ok(model);
        }

        let merged: E::Model =
            serde_json::from_value(merged).map_err(|e| DbErr::Json(e.to_string()))?;
        let source = merged.into_active_model();

        let mut active = model.into_active_model();
        for column in changed {
            if let Some(value) = source.get(column).into_value() {
                active.set(column, value);
            }
        }

        self.save(active).await
    }

    /// Deletes a record.
    ///
    /// Check [`DeleteResult::rows_affected`] to know whether a row was actually removed.
    pub async fn delete(&self, model: E::Model) -> Result<DeleteResult, DbErr>
    where
        E::ActiveModel: ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<E::ActiveModel>,
    {
        let name = Self::entity_name();

        match model.into_active_model().delete(self.db).await {
            Ok(result) => {
                tracing::info!("{} record deleted ({} rows)", name, result.rows_affected);

                Ok(result)
            }
            Err(e) => {
                tracing::error!("Failed to delete {} record: {}", name, e);

                Err(e)
            }
        }
    }

    /// Finds a record by primary key.
    pub async fn get_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Display,
    {
        let name = Self::entity_name();
        let id_display = id.to_string();

        let result = E::find_by_id(id).one(self.db).await;

        log_lookup(&name, &id_display, result)
    }

    /// Finds a record by primary key, returned as a JSON object.
    pub async fn get_by_id_json<K>(&self, id: K) -> Result<Option<Json>, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Display,
    {
        let name = Self::entity_name();
        let id_display = id.to_string();

        let result = E::find_by_id(id).into_json().one(self.db).await;

        log_lookup(&name, &id_display, result)
    }

    /// Lists records, skipping `skip` rows and returning at most `limit` (all when `None`).
    pub async fn get_all(&self, skip: u64, limit: Option<u64>) -> Result<Vec<E::Model>, DbErr> {
        self.filter(Condition::all(), skip, limit).await
    }

    /// Same as [`CrudRepository::get_all`] with records returned as JSON objects.
    pub async fn get_all_json(&self, skip: u64, limit: Option<u64>) -> Result<Vec<Json>, DbErr> {
        self.filter_json(Condition::all(), skip, limit).await
    }

    /// Lists records matching `condition` with pagination.
    ///
    /// # Example
    /// ```ignore
    /// let repo = CrudRepository::<_, entity::user::Entity>::new(&db);
    /// let neo = repo
    ///     .filter(Condition::all().add(entity::user::Column::Name.eq("neo")), 0, Some(10))
    ///     .await?;
    /// ```
    pub async fn filter(
        &self,
        condition: Condition,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<E::Model>, DbErr> {
        let name = Self::entity_name();
        check_page_bounds(&name, skip, limit)?;
        let description = format!("{:?}", condition);

        let result = E::find()
            .filter(condition)
            .offset(skip)
            .limit(limit)
            .all(self.db)
            .await;

        log_listing(&name, &description, skip, limit, result)
    }

    /// Same as [`CrudRepository::filter`] with records returned as JSON objects.
    pub async fn filter_json(
        &self,
        condition: Condition,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Json>, DbErr> {
        let name = Self::entity_name();
        check_page_bounds(&name, skip, limit)?;
        let description = format!("{:?}", condition);

        let result = E::find()
            .filter(condition)
            .offset(skip)
            .limit(limit)
            .into_json()
            .all(self.db)
            .await;

        log_listing(&name, &description, skip, limit, result)
    }

    /// Lists records where `column` equals `value`.
    pub async fn filter_by<V>(
        &self,
        column: E::Column,
        value: V,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<E::Model>, DbErr>
    where
        V: Into<sea_orm::Value>,
    {
        self.filter(Condition::all().add(column.eq(value)), skip, limit)
            .await
    }
}

fn check_page_bounds(name: &str, skip: u64, limit: Option<u64>) -> Result<(), DbErr> {
    if skip > MAX_PAGE_BOUND || limit.is_some_and(|limit| limit > MAX_PAGE_BOUND) {
        tracing::error!(
            "Refusing to fetch {} records, skip={} limit={:?} out of range",
            name,
            skip,
            limit
        );

        return Err(DbErr::Custom(format!(
            "skip and limit must be at most {}",
            MAX_PAGE_BOUND
        )));
    }

    Ok(())
}

fn log_lookup<T>(name: &str, id: &str, result: Result<Option<T>, DbErr>) -> Result<Option<T>, DbErr> {
    match &result {
        Ok(Some(_)) => tracing::info!("{} with id={} found", name, id),
        Ok(None) => tracing::info!("{} with id={} not found", name, id),
        Err(e) => tracing::error!("Failed to get {} with id={}: {}", name, id, e),
    }

    result
}

fn log_listing<T>(
    name: &str,
    description: &str,
    skip: u64,
    limit: Option<u64>,
    result: Result<Vec<T>, DbErr>,
) -> Result<Vec<T>, DbErr> {
    match &result {
        Ok(records) => tracing::info!(
            "Fetched {} {} records ({}, skip={}, limit={:?})",
            records.len(),
            name,
            description,
            skip,
            limit
        ),
        Err(e) => tracing::error!("Failed to fetch {} records: {}", name, e),
    }

    result
}
