//! Comments repository.

use muslimnet_core::ContentFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{flags_from_row, now_timestamp, parse_datetime, FLAG_COLUMNS};
use crate::error::Result;
use crate::models::Comment;

/// Repository for comment operations.
pub struct CommentsRepo;

impl CommentsRepo {
    /// Insert a new comment with its initial flags.
    pub fn insert(
        conn: &Connection,
        post_id: i64,
        user_id: i64,
        content: &str,
        flags: &ContentFlags,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO comments (post_id, user_id, content, is_approved, is_moderated,
                                   flagged_for_content, flag_reason, moderation_comment, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                post_id,
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

    /// Get a comment by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Comment>> {
        let sql = format!(
            "SELECT id, post_id, user_id, content, {}, created_at FROM comments WHERE id = ?1",
            FLAG_COLUMNS
        );
        let comment = conn.query_row(&sql, [id], comment_from_row).optional()?;
        Ok(comment)
    }

    /// Get the approved comments on a post, oldest first.
    pub fn get_for_post(conn: &Connection, post_id: i64) -> Result<Vec<Comment>> {
        Self::query(
            conn,
            "WHERE post_id = ?1 AND is_approved = 1 ORDER BY created_at, id",
            [post_id],
        )
    }

    /// Get comments waiting for review, newest first.
    pub fn get_flagged(conn: &Connection) -> Result<Vec<Comment>> {
        Self::query(
            conn,
            "WHERE flagged_for_content = 1 ORDER BY created_at DESC, id DESC",
            [],
        )
    }

    /// Get comments that are neither flagged nor reviewed.
    pub fn get_clean(conn: &Connection) -> Result<Vec<Comment>> {
        Self::query(
            conn,
            "WHERE flagged_for_content = 0 AND is_moderated = 0 ORDER BY id",
            [],
        )
    }

    /// Overwrite the moderation flags. Returns false if no such comment.
    pub fn update_flags(conn: &Connection, id: i64, flags: &ContentFlags) -> Result<bool> {
        let updated = conn.execute(
            "UPDATE comments SET is_approved = ?1, is_moderated = ?2, flagged_for_content = ?3,
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

    /// Delete a comment. Returns false if no such comment.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let deleted = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    /// Count comments waiting for review.
    pub fn count_flagged(conn: &Connection) -> Result<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM comments WHERE flagged_for_content = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn query(
        conn: &Connection,
        clause: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Comment>> {
        let sql = format!(
            "SELECT id, post_id, user_id, content, {}, created_at FROM comments {}",
            FLAG_COLUMNS, clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let comments = stmt
            .query_map(params, comment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(comments)
    }
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        flags: flags_from_row(row, 4)?,
        created_at: parse_datetime(&row.get::<_, String>(9)?),
    })
}
