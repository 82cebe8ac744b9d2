//! Posts repository.

use muslimnet_core::ContentFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{flags_from_row, now_timestamp, parse_datetime, FLAG_COLUMNS};
use crate::error::Result;
use crate::models::Post;

/// Repository for post operations.
pub struct PostsRepo;

impl PostsRepo {
    /// Insert a new post with its initial flags.
    pub fn insert(conn: &Connection, user_id: i64, content: &str, flags: &ContentFlags) -> Result<i64> {
        conn.execute(
            "INSERT INTO posts (user_id, content, is_approved, is_moderated, flagged_for_content,
                                flag_reason, moderation_comment, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                content,
                flags.is_approved as i32,
                flags.is_moderated as i32,
                flags.flagged_for_content as i32,
                flags.flag_reason,
                flags.moderation_comment,
                now_timestamp(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a post by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Post>> {
        let sql = format!(
            "SELECT id, user_id, content, {}, created_at FROM posts WHERE id = ?1",
            FLAG_COLUMNS
        );
        let post = conn.query_row(&sql, [id], post_from_row).optional()?;
        Ok(post)
    }

    /// Get approved posts, newest first.
    pub fn get_visible(conn: &Connection, limit: i64, offset: i64) -> Result<Vec<Post>> {
        Self::query(
            conn,
            "WHERE is_approved = 1 ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
            params![limit, offset],
        )
    }

    /// Get posts waiting for review, newest first.
    pub fn get_flagged(conn: &Connection) -> Result<Vec<Post>> {
        Self::query(
            conn,
            "WHERE flagged_for_content = 1 ORDER BY created_at DESC, id DESC",
            [],
        )
    }

    /// Get posts that are neither flagged nor reviewed.
    pub fn get_clean(conn: &Connection) -> Result<Vec<Post>> {
        Self::query(
            conn,
            "WHERE flagged_for_content = 0 AND is_moderated = 0 ORDER BY id",
            [],
        )
    }

    /// Overwrite the moderation flags. Returns false if no such post.
    pub fn update_flags(conn: &Connection, id: i64, flags: &ContentFlags) -> Result<bool> {
        let updated = conn.execute(
            "UPDATE posts SET is_approved = ?1, is_moderated = ?2, flagged_for_content = ?3,
                              flag_reason = ?4, moderation_comment = ?5
             WHERE id = ?6",
            params![
                flags.is_approved as i32,
                flags.is_moderated as i32,
                flags.flagged_for_content as i32,
                flags.flag_reason,
                flags.moderation_comment,
                id,
            ],
        )?;
        Ok(updated > 0)
    }

    /// Delete a post and its comments. Returns false if no such post.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let deleted = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    /// Count posts waiting for review.
    pub fn count_flagged(conn: &Connection) -> Result<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE flagged_for_content = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn query(conn: &Connection, clause: &str, params: impl rusqlite::Params) -> Result<Vec<Post>> {
        let sql = format!(
            "SELECT id, user_id, content, {}, created_at FROM posts {}",
            FLAG_COLUMNS, clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
            .query_map(params, post_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        flags: flags_from_row(row, 3)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}
