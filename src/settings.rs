// App-level settings - persisted across sessions
use directories::{BaseDirs, ProjectDirs};
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

const AUTO_HIDE_KEY: &str = "player.auto_hide_ms";
const AUTOPLAY_KEY: &str = "player.autoplay";

/// How many recent catalogs are listed
const RECENT_LIMIT: usize = 10;

/// Catalog history entry
#[derive(Debug, Clone, PartialEq)]
pub struct RecentCatalog {
    pub id: i64,
    pub path: PathBuf,
    pub title: String,
    pub last_opened: String,
}

/// App-level settings manager
pub struct AppSettings {
    conn: Connection,
}

impl AppSettings {
    /// Open or create the settings database in the platform config dir
    pub fn open() -> Result<Self> {
        let settings_path = Self::get_settings_path();

        // Create parent directory if needed
        if let Some(parent) = settings_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        Self::open_at(&settings_path)
    }

    /// Open or create a settings database at an explicit path
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let settings = Self { conn };
        settings.initialize_schema()?;
        Ok(settings)
    }

    /// Get the path to the settings database
    fn get_settings_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("com", "tutorials", "TutorialLibraryPlayer") {
            proj_dirs.config_dir().join("settings.db")
        } else {
            // Fallback to home directory
            BaseDirs::new()
                .map(|dirs| dirs.home_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".tutorial-player-settings.db")
        }
    }

    /// Initialize database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS app_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS recent_catalogs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT UNIQUE NOT NULL,
                title TEXT NOT NULL,
                last_opened TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_recent_catalogs_last_opened
                ON recent_catalogs(last_opened DESC);
            "#,
        )?;
        Ok(())
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
    }

    /// Set a setting value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO app_settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Saved auto-hide delay; unparseable values are ignored
    pub fn auto_hide_delay(&self) -> Option<Duration> {
        let raw = self.get(AUTO_HIDE_KEY).ok()??;
        match raw.parse::<u64>() {
            Ok(ms) => Some(Duration::from_millis(ms)),
            Err(_) => {
                tracing::warn!("Ignoring invalid {} setting {:?}", AUTO_HIDE_KEY, raw);
                None
            }
        }
    }

    pub fn set_auto_hide_delay(&self, delay: Duration) -> Result<()> {
        self.set(AUTO_HIDE_KEY, &delay.as_millis().to_string())
    }

    /// Saved autoplay preference
    pub fn autoplay(&self) -> Option<bool> {
        let raw = self.get(AUTOPLAY_KEY).ok()??;
        match raw.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                tracing::warn!("Ignoring invalid {} setting {:?}", AUTOPLAY_KEY, raw);
                None
            }
        }
    }

    pub fn set_autoplay(&self, autoplay: bool) -> Result<()> {
        self.set(AUTOPLAY_KEY, if autoplay { "true" } else { "false" })
    }

    /// Add or refresh a catalog in the history
    pub fn record_catalog(&self, path: &Path, title: &str) -> Result<()> {
        let path_str = path.display().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.conn.execute(
            r#"
            INSERT INTO recent_catalogs (path, title, last_opened)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(path) DO UPDATE SET
                title = ?2,
                last_opened = ?3
            "#,
            params![path_str, title, now],
        )?;
        Ok(())
    }

    /// Recently opened catalogs, newest first
    pub fn recent_catalogs(&self) -> Result<Vec<RecentCatalog>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, path, title, last_opened
            FROM recent_catalogs
            ORDER BY last_opened DESC, id DESC
            LIMIT ?1
            "#,
        )?;

        let entries = stmt.query_map(params![RECENT_LIMIT as i64], |row| {
            let path_str: String = row.get(1)?;
            Ok(RecentCatalog {
                id: row.get(0)?,
                path: PathBuf::from(path_str),
                title: row.get(2)?,
                last_opened: row.get(3)?,
            })
        })?;

        entries.collect()
    }

    /// Remove a catalog from history
    pub fn remove_catalog(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM recent_catalogs WHERE id = ?1", params![id])?;
        Ok(())
    }
}
