//! SQL query constants
//!
//! Contains all SQL queries used by the application.

/// Create the sample table on first use
pub const CREATE_SAMPLE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS sample_data (
        id SERIAL PRIMARY KEY,
        message VARCHAR(255),
        region VARCHAR(50),
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Insert one sample row ($1 = message, $2 = region)
pub const INSERT_SAMPLE: &str = r#"
    INSERT INTO sample_data (message, region)
    VALUES ($1, $2)
"#;

/// Most recent sample rows, newest first ($1 = limit)
pub const RECENT_SAMPLES: &str = r#"
    SELECT id, message, region, created_at
    FROM sample_data
    ORDER BY created_at DESC, id DESC
    LIMIT $1
"#;
