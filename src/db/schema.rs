//! Database schema and migrations for plaza.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Boards table - one row per (tenant, category) pair
    r#"
-- Boards are provisioned here (or by an operator), never by request flow
CREATE TABLE boards (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id  INTEGER NOT NULL,
    category    TEXT NOT NULL,      -- 'notice', 'event', 'faq', 'voice', 'inquiry'
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(company_id, category)
);
"#,
    // v2: Default tenant boards
    r#"
INSERT INTO boards (company_id, category) VALUES
    (1, 'notice'),
    (1, 'event'),
    (1, 'faq'),
    (1, 'voice'),
    (1, 'inquiry');
"#,
    // v3: Posts table
    r#"
CREATE TABLE posts (
    post_no      INTEGER PRIMARY KEY AUTOINCREMENT,
    board_id     INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
    title        TEXT NOT NULL,
    content      TEXT NOT NULL,
    writer       TEXT NOT NULL,
    author_name  TEXT,               -- encryption token, privacy boards only
    author_email TEXT,               -- encryption token, privacy boards only
    author_phone TEXT,               -- encryption token, privacy boards only
    password     TEXT,               -- Argon2 hash, privacy boards only
    status       TEXT NOT NULL DEFAULT 'published',  -- 'pending', 'answered', 'published'
    create_ip    TEXT NOT NULL,
    create_dt    TEXT NOT NULL DEFAULT (datetime('now')),
    update_ip    TEXT,
    update_dt    TEXT,
    views        INTEGER NOT NULL DEFAULT 0,
    top_yn       TEXT NOT NULL DEFAULT 'N'           -- 'Y' pins the post above the rest
);

CREATE INDEX idx_posts_board_id ON posts(board_id);
CREATE INDEX idx_posts_board_list ON posts(board_id, top_yn, create_dt);
"#,
    // v4: Replies table - at most one live row per post, maintained by upsert
    r#"
CREATE TABLE replies (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    post_no       INTEGER NOT NULL REFERENCES posts(post_no) ON DELETE CASCADE,
    reply_content TEXT NOT NULL,
    admin_id      INTEGER NOT NULL,
    created_at    TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_replies_post_no ON replies(post_no);
"#,
    // v5: Consultation leads
    r#"
CREATE TABLE consultation (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,       -- encryption token
    phone       TEXT NOT NULL,       -- encryption token
    email       TEXT,                -- encryption token
    region      TEXT,
    budget      TEXT,
    experience  TEXT,
    path        TEXT,
    message     TEXT,
    status      TEXT NOT NULL DEFAULT 'pending',  -- 'pending', 'in_progress', 'done'
    create_ip   TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT
);

CREATE INDEX idx_consultation_status ON consultation(status);
"#,
];
