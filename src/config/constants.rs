// Centralized configuration constants

// Network
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const MIN_VALID_PORT: u16 = 1024;
pub const MAX_VALID_PORT: u16 = 65535;
pub const MAX_WORKER_THREADS: usize = 256;

// Database (MySQL)
pub const DEFAULT_DB_USER: &str = "user";
pub const DEFAULT_DB_PASS: &str = "password";
pub const DEFAULT_DB_NAME: &str = "account_catalog";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_POOL: u32 = 5;
pub const DEFAULT_DB_CONN_TIMEOUT_SECS: u64 = 30;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Auth
pub const DEFAULT_AUTH_TOKEN_EXPIRY_HOURS: i64 = 24;
pub const MAX_AUTH_TOKEN_EXPIRY_HOURS: i64 = 24 * 365;

// CORS
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 3600;
