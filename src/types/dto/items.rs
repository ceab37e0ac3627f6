use poem_openapi::{payload::Json, types::MaybeUndefined, ApiResponse, Object};

use crate::errors::ItemApiError;
use crate::types::db::item;
use crate::types::dto::common::ErrorDetail;

/// Request model for creating a new item
#[derive(Object, Debug, Clone, PartialEq)]
pub struct CreateItemRequest {
    /// Unique name of the item
    #[oai(validator(min_length = 1))]
    pub name: String,

    /// Optional description of the item
    pub description: Option<String>,
}

/// Request model for partially updating an item
///
/// Omitted fields are left untouched. An explicit `null` description clears it.
#[derive(Object, Debug, Clone, PartialEq)]
pub struct UpdateItemRequest {
    /// New name for the item
    pub name: MaybeUndefined<String>,

    /// New description, or `null` to clear it
    pub description: MaybeUndefined<String>,
}

/// Response model representing an item
#[derive(Object, Debug, Clone, PartialEq)]
pub struct Item {
    /// Identifier assigned by the database
    pub id: i64,

    /// Unique name of the item
    pub name: String,

    /// Optional description of the item
    pub description: Option<String>,
}

impl From<item::Model> for Item {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// Responses for `GET /items/`
#[derive(ApiResponse, Debug)]
pub enum ListItemsResponse {
    /// All stored items
    #[oai(status = 200)]
    Ok(Json<Vec<Item>>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorDetail>),
}

impl From<ItemApiError> for ListItemsResponse {
    fn from(err: ItemApiError) -> Self {
        ListItemsResponse::InternalError(err.body())
    }
}

/// Responses for `GET /items/{item_id}`
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "get_item_bad_request")]
pub enum GetItemResponse {
    /// The requested item
    #[oai(status = 200)]
    Ok(Json<Item>),

    /// No item with this id
    #[oai(status = 404)]
    NotFound(Json<ErrorDetail>),

    /// Malformed item id
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorDetail>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorDetail>),
}

fn get_item_bad_request(err: poem::Error) -> GetItemResponse {
    ItemApiError::from_parse_error(err).into()
}

impl From<ItemApiError> for GetItemResponse {
    fn from(err: ItemApiError) -> Self {
        match err {
            ItemApiError::NotFound => GetItemResponse::NotFound(err.body()),
            ItemApiError::Unprocessable(_) => GetItemResponse::UnprocessableEntity(err.body()),
            ItemApiError::DuplicateName | ItemApiError::Internal => {
                GetItemResponse::InternalError(ItemApiError::Internal.body())
            }
        }
    }
}

/// Responses for `POST /items/`
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "create_item_bad_request")]
pub enum CreateItemResponse {
    /// The newly created item
    #[oai(status = 201)]
    Created(Json<Item>),

    /// An item with this name already exists
    #[oai(status = 409)]
    Conflict(Json<ErrorDetail>),

    /// Missing or invalid fields
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorDetail>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorDetail>),
}

fn create_item_bad_request(err: poem::Error) -> CreateItemResponse {
    ItemApiError::from_parse_error(err).into()
}

impl From<ItemApiError> for CreateItemResponse {
    fn from(err: ItemApiError) -> Self {
        match err {
            ItemApiError::DuplicateName => CreateItemResponse::Conflict(err.body()),
            ItemApiError::Unprocessable(_) => CreateItemResponse::UnprocessableEntity(err.body()),
            ItemApiError::NotFound | ItemApiError::Internal => {
                CreateItemResponse::InternalError(ItemApiError::Internal.body())
            }
        }
    }
}

/// Responses for `PATCH /items/{item_id}`
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "update_item_bad_request")]
pub enum UpdateItemResponse {
    /// The item after the update
    #[oai(status = 200)]
    Ok(Json<Item>),

    /// No item with this id
    #[oai(status = 404)]
    NotFound(Json<ErrorDetail>),

    /// Another item already has the requested name
    #[oai(status = 409)]
    Conflict(Json<ErrorDetail>),

    /// Malformed item id or invalid fields
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorDetail>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorDetail>),
}

fn update_item_bad_request(err: poem::Error) -> UpdateItemResponse {
    ItemApiError::from_parse_error(err).into()
}

impl From<ItemApiError> for UpdateItemResponse {
    fn from(err: ItemApiError) -> Self {
        match err {
            ItemApiError::NotFound => UpdateItemResponse::NotFound(err.body()),
            ItemApiError::DuplicateName => UpdateItemResponse::Conflict(err.body()),
            ItemApiError::Unprocessable(_) => UpdateItemResponse::UnprocessableEntity(err.body()),
            ItemApiError::Internal => UpdateItemResponse::InternalError(err.body()),
        }
    }
}

/// Responses for `DELETE /items/{item_id}`
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "delete_item_bad_request")]
pub enum DeleteItemResponse {
    /// The item was removed
    #[oai(status = 204)]
    NoContent,

    /// No item with this id
    #[oai(status = 404)]
    NotFound(Json<ErrorDetail>),

    /// Malformed item id
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorDetail>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorDetail>),
}

fn delete_item_bad_request(err: poem::Error) -> DeleteItemResponse {
    ItemApiError::from_parse_error(err).into()
}

impl From<ItemApiError> for DeleteItemResponse {
    fn from(err: ItemApiError) -> Self {
        match err {
            ItemApiError::NotFound => DeleteItemResponse::NotFound(err.body()),
            ItemApiError::Unprocessable(_) => DeleteItemResponse::UnprocessableEntity(err.body()),
            ItemApiError::DuplicateName | ItemApiError::Internal => {
                DeleteItemResponse::InternalError(ItemApiError::Internal.body())
            }
        }
    }
}
