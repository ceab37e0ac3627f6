use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Item name already exists: {name}")]
    DuplicateName { name: String },
}
