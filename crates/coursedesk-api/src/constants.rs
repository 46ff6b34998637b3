//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Path under which stored uploads are served back
pub const UPLOADS_PATH: &str = "/uploads";

/// Multipart field carrying the uploaded document
pub const UPLOAD_FIELD: &str = "curriculumFile";

/// Where the OpenAPI document is served
pub const OPENAPI_PATH: &str = "/api/openapi.json";
