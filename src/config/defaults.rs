pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 2000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 1;
pub const DEV_SESSION_SECRET: &str = "secret-key-goes-here";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_SECURE_COOKIE: bool = false;
