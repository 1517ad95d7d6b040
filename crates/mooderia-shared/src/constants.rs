/// Application name
pub const APP_NAME: &str = "Mooderia";

/// Model used for the reasoning-heavy personas (psychiatrist,
/// nutritionist, study guide).
pub const MODEL_PRO: &str = "gemini-3-pro-preview";

/// Model used for the quick, flavor personas (fortune teller,
/// horoscope, compatibility).
pub const MODEL_FLASH: &str = "gemini-3-flash-preview";

/// Path of the generation proxy endpoint, relative to the proxy base URL.
pub const GENERATE_PATH: &str = "/api/generate";

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Snapshot key under which the user directory is persisted.
pub const SNAPSHOT_KEY_USERS: &str = "mooderia_all_users";

/// Snapshot key under which the message log is persisted.
pub const SNAPSHOT_KEY_MESSAGES: &str = "mooderia_messages";
