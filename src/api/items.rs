use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::ItemApiError;
use crate::types::dto::items::{
    CreateItemRequest, CreateItemResponse, DeleteItemResponse, GetItemResponse, Item,
    ListItemsResponse, UpdateItemRequest, UpdateItemResponse,
};
use crate::types::internal::ItemChanges;
use std::sync::Arc;

/// Item CRUD endpoints
///
/// Every handler opens its own transaction, passes it to the store, and
/// commits only on success. Early returns drop the transaction, which rolls
/// it back.
pub struct ItemsApi {
    app_data: Arc<AppData>,
}

impl ItemsApi {
    /// Create a new ItemsApi over the shared application data
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ItemTags {
    /// Item management endpoints
    Items,
}

#[OpenApi]
impl ItemsApi {
    /// List all items
    #[oai(path = "/items", method = "get", tag = "ItemTags::Items")]
    async fn list_items(&self) -> ListItemsResponse {
        match self.list_all().await {
            Ok(items) => ListItemsResponse::Ok(Json(items)),
            Err(err) => err.into(),
        }
    }

    /// Retrieve a single item by id
    #[oai(path = "/items/:item_id", method = "get", tag = "ItemTags::Items")]
    async fn get_item(&self, item_id: Path<i64>) -> GetItemResponse {
        match self.find(item_id.0).await {
            Ok(item) => GetItemResponse::Ok(Json(item)),
            Err(err) => err.into(),
        }
    }

    /// Create a new item
    #[oai(path = "/items", method = "post", tag = "ItemTags::Items")]
    async fn create_item(&self, body: Json<CreateItemRequest>) -> CreateItemResponse {
        match self.create(body.0).await {
            Ok(item) => CreateItemResponse::Created(Json(item)),
            Err(err) => err.into(),
        }
    }

    /// Partially update an existing item
    ///
    /// Only the supplied fields change.
    #[oai(path = "/items/:item_id", method = "patch", tag = "ItemTags::Items")]
    async fn update_item(
        &self,
        item_id: Path<i64>,
        body: Json<UpdateItemRequest>,
    ) -> UpdateItemResponse {
        match self.update(item_id.0, body.0).await {
            Ok(item) => UpdateItemResponse::Ok(Json(item)),
            Err(err) => err.into(),
        }
    }

    /// Delete an item by id
    #[oai(path = "/items/:item_id", method = "delete", tag = "ItemTags::Items")]
    async fn delete_item(&self, item_id: Path<i64>) -> DeleteItemResponse {
        match self.delete(item_id.0).await {
            Ok(()) => DeleteItemResponse::NoContent,
            Err(err) => err.into(),
        }
    }
}

impl ItemsApi {
    async fn list_all(&self) -> Result<Vec<Item>, ItemApiError> {
        let txn = begin_transaction(&self.app_data.db).await?;
        let items = self.app_data.item_store.list_all(&txn).await?;
        commit_transaction(txn).await?;

        Ok(items.into_iter().map(Item::from).collect())
    }

    async fn find(&self, item_id: i64) -> Result<Item, ItemApiError> {
        let txn = begin_transaction(&self.app_data.db).await?;
        let item = self
            .app_data
            .item_store
            .get(&txn, item_id)
            .await?
            .ok_or(ItemApiError::NotFound)?;
        commit_transaction(txn).await?;

        Ok(item.into())
    }

    async fn create(&self, request: CreateItemRequest) -> Result<Item, ItemApiError> {
        let txn = begin_transaction(&self.app_data.db).await?;
        let created = self
            .app_data
            .item_store
            .create(&txn, request.name, request.description)
            .await?;
        commit_transaction(txn).await?;

        tracing::info!("Item {} created", created.id);

        Ok(created.into())
    }

    async fn update(&self, item_id: i64, request: UpdateItemRequest) -> Result<Item, ItemApiError> {
        let changes = ItemChanges::try_from(request).map_err(ItemApiError::Unprocessable)?;

        let txn = begin_transaction(&self.app_data.db).await?;
        let updated = self
            .app_data
            .item_store
            .update(&txn, item_id, changes)
            .await?
            .ok_or(ItemApiError::NotFound)?;
        commit_transaction(txn).await?;

        Ok(updated.into())
    }

    async fn delete(&self, item_id: i64) -> Result<(), ItemApiError> {
        let txn = begin_transaction(&self.app_data.db).await?;
        let deleted = self.app_data.item_store.delete(&txn, item_id).await?;
        if !deleted {
            return Err(ItemApiError::NotFound);
        }
        commit_transaction(txn).await?;

        tracing::info!("Item {} deleted", item_id);

        Ok(())
    }
}
