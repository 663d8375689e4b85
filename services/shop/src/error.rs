use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sweetshop_core::error::{ApiError, error_response};

/// Shop service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Price and quantity must be non-negative")]
    NegativeStock,
    #[error("Price must be non-negative")]
    NegativePrice,
    #[error("Quantity must be non-negative")]
    NegativeQuantity,
    #[error("Name and category must not be empty")]
    EmptyField,
    #[error("Restock quantity must be non-negative")]
    NegativeRestock,
    #[error("Restock would exceed the maximum stock level")]
    StockOverflow,
    #[error("Invalid price filter")]
    InvalidPriceFilter,
    #[error("Invalid search query")]
    InvalidQuery,
    #[error("Sweet not found")]
    SweetNotFound,
    #[error("Out of stock")]
    OutOfStock,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError for ShopError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredentials
            | Self::InvalidEmail
            | Self::PasswordTooShort
            | Self::EmailTaken
            | Self::MissingFields
            | Self::NegativeStock
            | Self::NegativePrice
            | Self::NegativeQuantity
            | Self::EmptyField
            | Self::NegativeRestock
            | Self::StockOverflow
            | Self::InvalidPriceFilter
            | Self::InvalidQuery
            | Self::OutOfStock => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::SweetNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingFields => "MISSING_FIELDS",
            Self::NegativeStock => "NEGATIVE_STOCK",
            Self::NegativePrice => "NEGATIVE_PRICE",
            Self::NegativeQuantity => "NEGATIVE_QUANTITY",
            Self::EmptyField => "EMPTY_FIELD",
            Self::NegativeRestock => "NEGATIVE_RESTOCK",
            Self::StockOverflow => "STOCK_OVERFLOW",
            Self::InvalidPriceFilter => "INVALID_PRICE_FILTER",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::SweetNotFound => "SWEET_NOT_FOUND",
            Self::OutOfStock => "OUT_OF_STOCK",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(&self)
    }
}
