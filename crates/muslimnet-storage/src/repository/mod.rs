//! Database repositories for each table.

pub mod comments;
pub mod posts;
pub mod users;

pub use comments::CommentsRepo;
pub use posts::PostsRepo;
pub use users::UsersRepo;

use chrono::{DateTime, Utc};
use muslimnet_core::ContentFlags;
use rusqlite::Row;

/// Moderation columns, in the order [`flags_from_row`] reads them.
pub(crate) const FLAG_COLUMNS: &str =
    "is_approved, is_moderated, flagged_for_content, flag_reason, moderation_comment";

/// Read the five moderation columns starting at `start`.
pub(crate) fn flags_from_row(row: &Row<'_>, start: usize) -> rusqlite::Result<ContentFlags> {
    Ok(ContentFlags {
        is_approved: row.get::<_, i32>(start)? != 0,
        is_moderated: row.get::<_, i32>(start + 1)? != 0,
        flagged_for_content: row.get::<_, i32>(start + 2)? != 0,
        flag_reason: row.get(start + 3)?,
        moderation_comment: row.get(start + 4)?,
    })
}

/// Current time in the format stored in `created_at` columns.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a datetime from SQLite format.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        })
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        let rfc = parse_datetime("2024-03-01T12:30:00+00:00");
        assert_eq!(rfc.to_rfc3339(), "2024-03-01T12:30:00+00:00");

        let sqlite = parse_datetime("2024-03-01 12:30:00");
        assert_eq!(sqlite, rfc);
    }
}
