//! # noted-db
//!
//! Persistence layer for the noted service.
//!
//! This crate provides:
//! - Connection pool management
//! - `PgNoteStore`, the durable PostgreSQL-backed store
//! - `MemoryNoteStore`, the transient in-process store
//!
//! Both implement `noted_core::NoteStore`; which one a process uses is
//! decided once at wiring time.
//!
//! ## Example
//!
//! ```rust,ignore
//! use noted_core::NoteStore;
//! use noted_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/noted").await?;
//!     db.init_schema().await?;
//!
//!     let note = db.notes.create("Hello", "world").await?;
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod memory;
pub mod notes;
pub mod pool;

// Re-export core types
pub use noted_core::*;

pub use memory::MemoryNoteStore;
pub use notes::{init_schema, PgNoteStore};
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context for the durable backend.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note store for CRUD operations.
    pub notes: PgNoteStore,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteStore::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Create the schema if it does not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        init_schema(&self.pool).await
    }
}
