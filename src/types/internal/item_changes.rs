use poem_openapi::types::MaybeUndefined;

use crate::types::dto::items::UpdateItemRequest;

/// What a partial update does to a single nullable column
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldChange<T> {
    /// Field was not supplied; keep the stored value
    #[default]
    Keep,
    /// Field was supplied with a value
    Set(T),
    /// Field was supplied as an explicit null
    Clear,
}

impl<T> FieldChange<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, FieldChange::Keep)
    }
}

impl<T> From<MaybeUndefined<T>> for FieldChange<T> {
    fn from(value: MaybeUndefined<T>) -> Self {
        match value {
            MaybeUndefined::Undefined => FieldChange::Keep,
            MaybeUndefined::Null => FieldChange::Clear,
            MaybeUndefined::Value(v) => FieldChange::Set(v),
        }
    }
}

/// Sparse set of field updates for an item
///
/// `name` is not nullable, so it can only be kept or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: FieldChange<String>,
}

impl ItemChanges {
    /// True when no field was supplied at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_keep()
    }
}

/// Builders for assembling change sets in tests
#[cfg(test)]
impl ItemChanges {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = FieldChange::Set(description.into());
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = FieldChange::Clear;
        self
    }
}

impl TryFrom<UpdateItemRequest> for ItemChanges {
    /// Human-readable reason the payload was rejected
    type Error = String;

    fn try_from(request: UpdateItemRequest) -> Result<Self, Self::Error> {
        let name = match request.name {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => return Err("name cannot be null".to_string()),
            MaybeUndefined::Value(name) if name.is_empty() => {
                return Err("name cannot be empty".to_string())
            }
            MaybeUndefined::Value(name) => Some(name),
        };

        Ok(Self {
            name,
            description: request.description.into(),
        })
    }
}
