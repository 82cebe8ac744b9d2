//! Users repository.

use muslimnet_core::auth::Role;
use muslimnet_core::AccountStanding;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use super::{now_timestamp, parse_datetime};
use crate::error::{Result, StorageError};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str = "id, username, password_hash, role, is_active, warning_count, \
     is_banned, ban_reason, created_at";

/// Repository for user operations.
pub struct UsersRepo;

impl UsersRepo {
    /// Insert a new user.
    pub fn insert(conn: &Connection, user: NewUser) -> Result<i64> {
        let inserted = conn.execute(
            "INSERT INTO users (username, password_hash, role, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.username,
                user.password_hash,
                user.role.as_str(),
                now_timestamp()
            ],
        );

        match inserted {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StorageError::Conflict(format!(
                    "username '{}' is taken",
                    user.username
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
        let user = conn.query_row(&sql, [id], user_from_row).optional()?;
        Ok(user)
    }

    /// Get a user by username.
    pub fn get_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS);
        let user = conn.query_row(&sql, [username], user_from_row).optional()?;
        Ok(user)
    }

    /// Get all users ordered by ID.
    pub fn get_all(conn: &Connection) -> Result<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Atomically add one warning and return the new count.
    ///
    /// The increment happens in SQL so concurrent writers cannot lose updates.
    pub fn increment_warnings(conn: &Connection, id: i64) -> Result<i64> {
        conn.query_row(
            "UPDATE users SET warning_count = warning_count + 1 WHERE id = ?1
             RETURNING warning_count",
            [id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| StorageError::NotFound(format!("user {}", id)))
    }

    /// Persist the ban fields of a standing. Returns false if no such user.
    pub fn set_ban_state(conn: &Connection, id: i64, standing: &AccountStanding) -> Result<bool> {
        let updated = conn.execute(
            "UPDATE users SET is_banned = ?1, ban_reason = ?2 WHERE id = ?3",
            params![standing.is_banned as i32, standing.ban_reason, id],
        )?;
        Ok(updated > 0)
    }

    /// Change a user's role. Returns false if no such user.
    pub fn set_role(conn: &Connection, id: i64, role: Role) -> Result<bool> {
        let updated = conn.execute(
            "UPDATE users SET role = ?1 WHERE id = ?2",
            params![role.as_str(), id],
        )?;
        Ok(updated > 0)
    }

    /// Activate or deactivate a user. Returns false if no such user.
    pub fn set_active(conn: &Connection, id: i64, active: bool) -> Result<bool> {
        let updated = conn.execute(
            "UPDATE users SET is_active = ?1 WHERE id = ?2",
            params![active as i32, id],
        )?;
        Ok(updated > 0)
    }

    /// Count users with at least one warning who are not banned.
    pub fn count_warned(conn: &Connection) -> Result<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE warning_count > 0 AND is_banned = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Count banned users.
    pub fn count_banned(conn: &Connection) -> Result<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE is_banned = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        role: Role::parse(&role).unwrap_or_default(),
        is_active: row.get::<_, i32>(4)? != 0,
        standing: AccountStanding {
            warning_count: row.get(5)?,
            is_banned: row.get::<_, i32>(6)? != 0,
            ban_reason: row.get(7)?,
        },
        created_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::run_migrations;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_get_user() {
        let conn = setup_db();
        let id = UsersRepo::insert(&conn, NewUser::new("ayse", "hash")).unwrap();

        let user = UsersRepo::get_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(user.username, "ayse");
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);
        assert_eq!(user.standing, AccountStanding::default());

        let by_name = UsersRepo::get_by_username(&conn, "ayse").unwrap().unwrap();
        assert_eq!(by_name.id, id);
    }

    #[test]
    fn test_duplicate_username_is_conflict() {
        let conn = setup_db();
        UsersRepo::insert(&conn, NewUser::new("ayse", "hash")).unwrap();
        let err = UsersRepo::insert(&conn, NewUser::new("ayse", "other")).unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[test]
    fn test_missing_user_is_none() {
        let conn = setup_db();
        assert!(UsersRepo::get_by_id(&conn, 99).unwrap().is_none());
    }

    #[test]
    fn test_increment_warnings_is_cumulative() {
        let conn = setup_db();
        let id = UsersRepo::insert(&conn, NewUser::new("ali", "hash")).unwrap();

        assert_eq!(UsersRepo::increment_warnings(&conn, id).unwrap(), 1);
        assert_eq!(UsersRepo::increment_warnings(&conn, id).unwrap(), 2);

        let user = UsersRepo::get_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(user.standing.warning_count, 2);
    }

    #[test]
    fn test_increment_warnings_missing_user() {
        let conn = setup_db();
        let err = UsersRepo::increment_warnings(&conn, 7).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_set_ban_state() {
        let conn = setup_db();
        let id = UsersRepo::insert(&conn, NewUser::new("ali", "hash")).unwrap();

        let mut standing = AccountStanding::default();
        standing.ban("spam").unwrap();
        assert!(UsersRepo::set_ban_state(&conn, id, &standing).unwrap());

        let user = UsersRepo::get_by_id(&conn, id).unwrap().unwrap();
        assert!(user.standing.is_banned);
        assert_eq!(user.standing.ban_reason.as_deref(), Some("spam"));
        assert_eq!(UsersRepo::count_banned(&conn).unwrap(), 1);
    }

    #[test]
    fn test_role_and_active_updates() {
        let conn = setup_db();
        let id = UsersRepo::insert(&conn, NewUser::new("mod", "hash")).unwrap();

        UsersRepo::set_role(&conn, id, Role::Moderator).unwrap();
        UsersRepo::set_active(&conn, id, false).unwrap();

        let user = UsersRepo::get_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(user.role, Role::Moderator);
        assert!(!user.is_active);
        assert!(!UsersRepo::set_role(&conn, 404, Role::Admin).unwrap());
    }

    #[test]
    fn test_count_warned_excludes_banned() {
        let conn = setup_db();
        let a = UsersRepo::insert(&conn, NewUser::new("a", "h")).unwrap();
        let b = UsersRepo::insert(&conn, NewUser::new("b", "h")).unwrap();
        UsersRepo::increment_warnings(&conn, a).unwrap();
        UsersRepo::increment_warnings(&conn, b).unwrap();

        let mut standing = AccountStanding::default();
        standing.ban("x").unwrap();
        UsersRepo::set_ban_state(&conn, b, &standing).unwrap();

        assert_eq!(UsersRepo::count_warned(&conn).unwrap(), 1);
    }
}
