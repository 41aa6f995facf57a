/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `schema`: Idempotent creation of the `tasks` table
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::db::schema::ensure_schema;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         username: "taskboard".to_string(),
///         database: "taskboard".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     ensure_schema(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;
