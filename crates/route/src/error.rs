//! Error types for the route crate.

use shopmap_geo::GeoError;
use thiserror::Error;

/// Result type alias for route operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors that can occur while building or querying a route network.
///
/// Disconnected shops and unreachable tour stops are not errors; they are
/// reported through infinite distances and fallback legs instead.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A query was made before any shop list was loaded
    #[error("Route optimizer is not initialized; load a shop list first")]
    NotInitialized,

    /// Matrices cannot be built for zero shops
    #[error("Shop list is empty")]
    EmptyShopList,

    /// A query coordinate is out of range
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    /// A shop carries an out-of-range location
    #[error("Shop {id} has an invalid location")]
    InvalidShopLocation {
        /// Shop identifier
        id: i64,
        /// Underlying coordinate error
        #[source]
        source: GeoError,
    },

    /// A query parameter is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A shop index does not exist in the current shop list
    #[error("Shop index {index} out of range for {len} shops")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of shops loaded
        len: usize,
    },

    /// A shop id does not exist in the current shop list
    #[error("Unknown shop id: {0}")]
    UnknownShop(i64),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error code for programmatic handling.
/// Range: 11xxx for route errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteErrorCode {
    /// Query before initialization
    NotInitialized = 11001,
    /// Empty shop list
    EmptyShopList = 11002,
    /// Invalid query coordinate
    InvalidCoordinate = 11003,
    /// Invalid shop location
    InvalidShopLocation = 11004,
    /// Invalid query parameter
    InvalidInput = 11005,
    /// Shop index out of range
    IndexOutOfRange = 11006,
    /// Unknown shop id
    UnknownShop = 11007,
    /// Configuration value out of range
    InvalidConfig = 11008,
    /// Configuration file error
    Config = 11009,
}

impl RouteError {
    /// Returns the error code for this error.
    pub fn code(&self) -> RouteErrorCode {
        match self {
            RouteError::NotInitialized => RouteErrorCode::NotInitialized,
            RouteError::EmptyShopList => RouteErrorCode::EmptyShopList,
            RouteError::InvalidCoordinate(_) => RouteErrorCode::InvalidCoordinate,
            RouteError::InvalidShopLocation { .. } => RouteErrorCode::InvalidShopLocation,
            RouteError::InvalidInput(_) => RouteErrorCode::InvalidInput,
            RouteError::IndexOutOfRange { .. } => RouteErrorCode::IndexOutOfRange,
            RouteError::UnknownShop(_) => RouteErrorCode::UnknownShop,
            RouteError::InvalidConfig(_) => RouteErrorCode::InvalidConfig,
            RouteError::Config(_) => RouteErrorCode::Config,
        }
    }

    /// True for failures caused by the caller's input rather than call order.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, RouteError::NotInitialized)
    }
}
