use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    tracing::info!("Connecting to database: {}", database_url);

    // Handle special SQLite URL formats
    let db = if database_url == "sqlite::memory:" {
        // Every pooled connection to :memory: would open its own empty
        // database; pin the pool to a single connection.
        let mut options = sea_orm::ConnectOptions::new(database_url.to_owned());
        options.max_connections(1).min_connections(1);
        Database::connect(options)
            .await
            .map_err(|e| DbErr::Custom(format!("Connection failed: {}", e)))?
    } else if let Some(path_str) = database_url.strip_prefix("sqlite://") {
        let path_str = path_str.split('?').next().unwrap_or(path_str);
        let path = std::path::Path::new(path_str);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DbErr::Custom(format!("Failed to create DB directory: {}", e)))?;
                tracing::info!("Created database directory: {}", parent.display());
            }
        }

        if !path.exists() {
            std::fs::File::create(path)
                .map_err(|e| DbErr::Custom(format!("Failed to create DB file: {}", e)))?;
            tracing::info!("Created database file: {}", path.display());
        }

        Database::connect(database_url)
            .await
            .map_err(|e| DbErr::Custom(format!("Connection failed: {}", e)))?
    } else {
        return Err(DbErr::Custom("Invalid SQLite URL format".to_string()));
    };

    apply_migrations(&db).await?;

    Ok(db)
}

/// Migration files are idempotent (IF NOT EXISTS), so they run on every
/// startup; the schema_migrations table records which have been seen.
async fn apply_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    tracing::info!("Applying migrations...");

    let migrations = [
        (
            "001_create_users",
            include_str!("../../migrations/001_create_users.sql"),
        ),
        (
            "002_create_conversations",
            include_str!("../../migrations/002_create_conversations.sql"),
        ),
        (
            "003_create_ai_memories",
            include_str!("../../migrations/003_create_ai_memories.sql"),
        ),
        (
            "004_create_risk_events",
            include_str!("../../migrations/004_create_risk_events.sql"),
        ),
        (
            "005_create_mood_logs",
            include_str!("../../migrations/005_create_mood_logs.sql"),
        ),
        (
            "006_create_techniques_tracking",
            include_str!("../../migrations/006_create_techniques_tracking.sql"),
        ),
        (
            "007_create_sessions_completed",
            include_str!("../../migrations/007_create_sessions_completed.sql"),
        ),
        (
            "008_create_journal_entries",
            include_str!("../../migrations/008_create_journal_entries.sql"),
        ),
        (
            "009_create_sos_events",
            include_str!("../../migrations/009_create_sos_events.sql"),
        ),
        (
            "010_create_audio_events",
            include_str!("../../migrations/010_create_audio_events.sql"),
        ),
    ];

    db.execute_unprepared(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    for (version, sql) in migrations {
        db.execute_unprepared(sql).await?;
        db.execute_unprepared(&format!(
            "INSERT OR IGNORE INTO schema_migrations (version) VALUES ('{}')",
            version
        ))
        .await?;
        tracing::debug!("Applied migration {}", version);
    }

    Ok(())
}
