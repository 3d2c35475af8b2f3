//! Book model

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Identifier assigned to a book by the store
pub type BookId = i64;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub author: String,
    /// Publication date, kept as given (not parsed)
    pub date: String,
}

/// Create book request (query parameters)
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CreateBook {
    pub name: String,
    pub author: String,
    pub date: String,
}

/// Update book request (query parameters).
///
/// Absent or empty fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UpdateBook {
    pub name: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}
