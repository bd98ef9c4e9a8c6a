//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations, in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_examples",
            sql: include_str!("../../migrations/001_examples.sql"),
        },
        Migration {
            id: "002_commit_log",
            sql: include_str!("../../migrations/002_commit_log.sql"),
        },
    ]
}
