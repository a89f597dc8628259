use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Create a SeaORM connection.
///
/// SQLite connections are capped to a single pooled connection: an in-memory database only lives
/// as long as the connection holding it, and a file database serializes writers anyway.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    if database_url.starts_with("sqlite") {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Minimal migration runner that executes the SQL files in `migrations/<backend>/` in filename
/// order. Every statement is written with `IF NOT EXISTS`, so running it twice is harmless.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let backend = conn.get_database_backend();
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("migrations")
        .join(backend_dir(backend)?);

    let mut entries = fs::read_dir(&dir).await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    for file in files {
        let sql = fs::read_to_string(&file).await?;
        // Prepared statements cannot contain multiple commands,
        // so split the migration file and run each statement individually.
        for stmt in sql.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            let statement = format!("{stmt};");
            conn.execute(Statement::from_string(backend, statement))
                .await?;
        }
        tracing::debug!(file = %file.display(), "migration applied");
    }

    Ok(())
}

fn backend_dir(backend: DatabaseBackend) -> Result<&'static str> {
    match backend {
        DatabaseBackend::Postgres => Ok("postgres"),
        DatabaseBackend::Sqlite => Ok("sqlite"),
        other => Err(anyhow::anyhow!("unsupported database backend {other:?}")),
    }
}
