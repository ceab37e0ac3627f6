use crate::errors::InternalError;
use crate::types::db::item::{self, ActiveModel, Entity as Items};
use crate::types::internal::item_changes::{FieldChange, ItemChanges};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

/// ItemStore owns all persistence for the `items` table
///
/// Every method runs on the connection it is handed. Callers that need
/// atomicity pass a transaction and decide when to commit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItemStore;

impl ItemStore {
    pub fn new() -> Self {
        Self
    }

    /// Look up a single item by primary key
    ///
    /// # Returns
    /// * `Ok(Some(Model))` - The item
    /// * `Ok(None)` - No item with that id
    /// * `Err(InternalError)` - Database error
    pub async fn get(
        &self,
        conn: &impl ConnectionTrait,
        id: i64,
    ) -> Result<Option<item::Model>, InternalError> {
        Items::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_item", e))
    }

    /// List every item, oldest id first
    pub async fn list_all(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<item::Model>, InternalError> {
        Items::find()
            .order_by_asc(item::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_items", e))
    }

    /// Insert a new item and return it with its assigned id
    ///
    /// # Returns
    /// * `Ok(Model)` - The created item
    /// * `Err(InternalError::Item(DuplicateName))` - Another item already has this name
    /// * `Err(InternalError)` - Database error
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        name: String,
        description: Option<String>,
    ) -> Result<item::Model, InternalError> {
        let new_item = ActiveModel {
            id: NotSet,
            name: Set(name.clone()),
            description: Set(description),
        };

        let created = new_item
            .insert(conn)
            .await
            .map_err(|e| InternalError::from_item_write("create_item", &name, e))?;

        tracing::debug!("Created item {} ({})", created.id, created.name);

        Ok(created)
    }

    /// Apply a partial update
    ///
    /// Only fields present in `changes` are written. An empty change set is a
    /// plain read: no statement is issued and no uniqueness check happens.
    ///
    /// The write is a single `UPDATE ... RETURNING`, so the enclosing
    /// transaction asks for the write lock on its first statement and
    /// concurrent updates queue behind each other instead of failing.
    ///
    /// # Returns
    /// * `Ok(Some(Model))` - The item after the update
    /// * `Ok(None)` - No item with that id
    /// * `Err(InternalError::Item(DuplicateName))` - The new name is taken
    /// * `Err(InternalError)` - Database error
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        id: i64,
        changes: ItemChanges,
    ) -> Result<Option<item::Model>, InternalError> {
        if changes.is_empty() {
            return self.get(conn, id).await;
        }

        let attempted_name = changes.name.clone();
        let mut query = Items::update_many().filter(item::Column::Id.eq(id));

        if let Some(name) = changes.name {
            query = query.col_expr(item::Column::Name, Expr::value(name));
        }

        match changes.description {
            FieldChange::Keep => {}
            FieldChange::Set(description) => {
                query = query.col_expr(item::Column::Description, Expr::value(Some(description)));
            }
            FieldChange::Clear => {
                query = query.col_expr(item::Column::Description, Expr::value(Option::<String>::None));
            }
        }

        let updated = query
            .exec_with_returning(conn)
            .await
            .map_err(|e| match &attempted_name {
                Some(name) => InternalError::from_item_write("update_item", name, e),
                None => InternalError::database("update_item", e),
            })?;

        let updated = updated.into_iter().next();
        if let Some(item) = &updated {
            tracing::debug!("Updated item {}", item.id);
        }

        Ok(updated)
    }

    /// Delete an item by id
    ///
    /// # Returns
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - No item with that id
    /// * `Err(InternalError)` - Database error
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        id: i64,
    ) -> Result<bool, InternalError> {
        let result = Items::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;

        Ok(result.rows_affected > 0)
    }
}
