use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No melon with id '{id}'")]
    NotFound { id: String },

    #[error("Duplicate melon id '{id}' in catalog seed")]
    DuplicateId { id: String },

    #[error("Melon '{id}' has a negative price: {price}")]
    NegativePrice { id: String, price: Decimal },

    #[error("Cart total overflowed while pricing melon '{id}'")]
    TotalOverflow { id: String },

    #[error("Malformed catalog seed: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("Failed to read catalog seed: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn not_found(id: &str) -> Self {
        CatalogError::NotFound { id: id.to_string() }
    }
}
