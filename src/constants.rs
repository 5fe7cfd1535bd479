//! Shared constants for recordkv.

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default MongoDB database name.
pub const DEFAULT_DATABASE: &str = "getir-case-study";

/// Default MongoDB collection name.
pub const DEFAULT_COLLECTION: &str = "records";

/// The only content type accepted for request bodies, and the one every
/// JSON response carries.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "recordkv.toml";
