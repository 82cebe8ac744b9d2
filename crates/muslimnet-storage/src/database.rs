//! High-level database interface.

use std::path::PathBuf;

use directories::ProjectDirs;
use muslimnet_core::auth::Role;
use muslimnet_core::{
    ContentState, EnforcementAction, ModerationWorkflow, ReviewDecision, SubmissionOutcome,
};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::models::{
    Comment, ModerationStats, NewUser, Post, RescanSummary, ReviewOutcome, Submission, User,
};
use crate::pool::ConnectionPool;
use crate::repository::{CommentsRepo, PostsRepo, UsersRepo};

/// High-level database interface for MüslimNet.
#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    /// Create a new database in the default app data directory.
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_db_path()?)
    }

    /// Create a new database at a specific path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Opening database at: {:?}", path);
        let pool = ConnectionPool::new(&path)?;

        Ok(Self { pool })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let pool = ConnectionPool::in_memory()?;
        Ok(Self { pool })
    }

    /// Get the default database path.
    pub fn default_db_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "muslimnet", "muslimnet")
            .ok_or_else(|| StorageError::Config("Could not determine app data directory".into()))?;

        Ok(proj_dirs.data_dir().join("muslimnet.db"))
    }

    // === Users ===

    /// Register a new user.
    pub fn create_user(&self, user: NewUser) -> Result<User> {
        let conn = self.pool.get()?;
        let id = UsersRepo::insert(&conn, user)?;
        require_user(&conn, id)
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        UsersRepo::get_by_id(&conn, id)
    }

    /// Get a user by username.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        UsersRepo::get_by_username(&conn, username)
    }

    /// Get all users.
    pub fn get_all_users(&self) -> Result<Vec<User>> {
        let conn = self.pool.get()?;
        UsersRepo::get_all(&conn)
    }

    /// Make sure an admin account with this username exists.
    ///
    /// An existing account is promoted and keeps its password.
    pub fn ensure_admin(&self, username: &str, password_hash: &str) -> Result<User> {
        let conn = self.pool.get()?;

        match UsersRepo::get_by_username(&conn, username)? {
            Some(user) => {
                if user.role != Role::Admin {
                    UsersRepo::set_role(&conn, user.id, Role::Admin)?;
                    info!(user_id = user.id, "Promoted existing user to admin");
                }
                require_user(&conn, user.id)
            }
            None => {
                let id = UsersRepo::insert(
                    &conn,
                    NewUser::new(username, password_hash).with_role(Role::Admin),
                )?;
                info!(user_id = id, "Created admin account");
                require_user(&conn, id)
            }
        }
    }

    /// Ban a user. The reason must not be blank.
    pub fn ban_user(&self, id: i64, reason: &str) -> Result<User> {
        let conn = self.pool.get()?;
        let user = require_user(&conn, id)?;

        let mut standing = user.standing;
        standing.ban(reason)?;
        UsersRepo::set_ban_state(&conn, id, &standing)?;

        info!(user_id = id, "User banned by moderator");
        require_user(&conn, id)
    }

    /// Lift a ban. Unbanning an account that is not banned changes nothing.
    pub fn unban_user(&self, id: i64) -> Result<User> {
        let conn = self.pool.get()?;
        let user = require_user(&conn, id)?;

        let mut standing = user.standing;
        standing.unban();
        UsersRepo::set_ban_state(&conn, id, &standing)?;

        info!(user_id = id, "User unbanned");
        require_user(&conn, id)
    }

    /// Activate or deactivate an account. Deactivated accounts cannot sign in.
    pub fn set_user_active(&self, id: i64, active: bool) -> Result<User> {
        let conn = self.pool.get()?;
        if !UsersRepo::set_active(&conn, id, active)? {
            return Err(StorageError::NotFound(format!("user {}", id)));
        }
        info!(user_id = id, active, "User activation changed");
        require_user(&conn, id)
    }

    // === Submissions ===

    /// Moderate and store a new post, enforcing against its author.
    pub fn submit_post(
        &self,
        workflow: &ModerationWorkflow,
        user_id: i64,
        content: &str,
    ) -> Result<Submission<Post>> {
        let conn = self.pool.get()?;
        let tx = conn.unchecked_transaction()?;

        let (outcome, author) = evaluate_author(&tx, workflow, user_id, content)?;
        let id = PostsRepo::insert(&tx, user_id, content, &outcome.flags)?;
        let author = enforce(&tx, author, &outcome)?;
        let item = PostsRepo::get_by_id(&tx, id)?
            .ok_or_else(|| StorageError::NotFound(format!("post {}", id)))?;

        tx.commit()?;

        log_submission("post", id, user_id, &outcome);
        Ok(Submission {
            item,
            outcome,
            author,
        })
    }

    /// Moderate and store a new comment, enforcing against its author.
    pub fn submit_comment(
        &self,
        workflow: &ModerationWorkflow,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Submission<Comment>> {
        let conn = self.pool.get()?;
        let tx = conn.unchecked_transaction()?;

        if PostsRepo::get_by_id(&tx, post_id)?.is_none() {
            return Err(StorageError::NotFound(format!("post {}", post_id)));
        }

        let (outcome, author) = evaluate_author(&tx, workflow, user_id, content)?;
        let id = CommentsRepo::insert(&tx, post_id, user_id, content, &outcome.flags)?;
        let author = enforce(&tx, author, &outcome)?;
        let item = CommentsRepo::get_by_id(&tx, id)?
            .ok_or_else(|| StorageError::NotFound(format!("comment {}", id)))?;

        tx.commit()?;

        log_submission("comment", id, user_id, &outcome);
        Ok(Submission {
            item,
            outcome,
            author,
        })
    }

    // === Content ===

    /// Get a post by ID.
    pub fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let conn = self.pool.get()?;
        PostsRepo::get_by_id(&conn, id)
    }

    /// Get approved posts, newest first.
    pub fn get_visible_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>> {
        let conn = self.pool.get()?;
        PostsRepo::get_visible(&conn, limit, offset)
    }

    /// Get a comment by ID.
    pub fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        let conn = self.pool.get()?;
        CommentsRepo::get_by_id(&conn, id)
    }

    /// Get the approved comments on a post. Fails if the post does not exist.
    pub fn get_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let conn = self.pool.get()?;
        if PostsRepo::get_by_id(&conn, post_id)?.is_none() {
            return Err(StorageError::NotFound(format!("post {}", post_id)));
        }
        CommentsRepo::get_for_post(&conn, post_id)
    }

    // === Review ===

    /// Posts waiting for review.
    pub fn get_flagged_posts(&self) -> Result<Vec<Post>> {
        let conn = self.pool.get()?;
        PostsRepo::get_flagged(&conn)
    }

    /// Comments waiting for review.
    pub fn get_flagged_comments(&self) -> Result<Vec<Comment>> {
        let conn = self.pool.get()?;
        CommentsRepo::get_flagged(&conn)
    }

    /// Apply a moderator's decision to a flagged post.
    ///
    /// Posts that were never flagged are refused with a workflow error.
    pub fn review_post(&self, id: i64, decision: &ReviewDecision) -> Result<ReviewOutcome<Post>> {
        let conn = self.pool.get()?;
        let mut post = PostsRepo::get_by_id(&conn, id)?
            .ok_or_else(|| StorageError::NotFound(format!("post {}", id)))?;

        match post.flags.review(decision)? {
            ContentState::Removed => {
                PostsRepo::delete(&conn, id)?;
                info!(post_id = id, "Post removed");
                Ok(ReviewOutcome::Removed)
            }
            _ => {
                PostsRepo::update_flags(&conn, id, &post.flags)?;
                info!(post_id = id, "Post approved");
                Ok(ReviewOutcome::Approved(post))
            }
        }
    }

    /// Apply a moderator's decision to a flagged comment.
    pub fn review_comment(
        &self,
        id: i64,
        decision: &ReviewDecision,
    ) -> Result<ReviewOutcome<Comment>> {
        let conn = self.pool.get()?;
        let mut comment = CommentsRepo::get_by_id(&conn, id)?
            .ok_or_else(|| StorageError::NotFound(format!("comment {}", id)))?;

        match comment.flags.review(decision)? {
            ContentState::Removed => {
                CommentsRepo::delete(&conn, id)?;
                info!(comment_id = id, "Comment removed");
                Ok(ReviewOutcome::Removed)
            }
            _ => {
                CommentsRepo::update_flags(&conn, id, &comment.flags)?;
                info!(comment_id = id, "Comment approved");
                Ok(ReviewOutcome::Approved(comment))
            }
        }
    }

    /// Re-moderate every clean post and comment, flagging the ones that now fail.
    pub fn rescan(&self, workflow: &ModerationWorkflow) -> Result<RescanSummary> {
        let conn = self.pool.get()?;
        let tx = conn.unchecked_transaction()?;
        let mut summary = RescanSummary::default();

        for post in PostsRepo::get_clean(&tx)? {
            if let Some(flags) = workflow.rescan(&post.content, &post.flags) {
                PostsRepo::update_flags(&tx, post.id, &flags)?;
                summary.flagged_posts += 1;
            }
        }

        for comment in CommentsRepo::get_clean(&tx)? {
            if let Some(flags) = workflow.rescan(&comment.content, &comment.flags) {
                CommentsRepo::update_flags(&tx, comment.id, &flags)?;
                summary.flagged_comments += 1;
            }
        }

        tx.commit()?;

        info!(
            flagged_posts = summary.flagged_posts,
            flagged_comments = summary.flagged_comments,
            "Rescan complete"
        );
        Ok(summary)
    }

    /// Review queue sizes and enforcement totals.
    pub fn moderation_stats(&self) -> Result<ModerationStats> {
        let conn = self.pool.get()?;
        Ok(ModerationStats {
            flagged_posts: PostsRepo::count_flagged(&conn)?,
            flagged_comments: CommentsRepo::count_flagged(&conn)?,
            warned_users: UsersRepo::count_warned(&conn)?,
            banned_users: UsersRepo::count_banned(&conn)?,
        })
    }
}

fn require_user(conn: &Connection, id: i64) -> Result<User> {
    UsersRepo::get_by_id(conn, id)?.ok_or_else(|| StorageError::NotFound(format!("user {}", id)))
}

/// Loads the author and runs moderation against their current standing.
fn evaluate_author(
    conn: &Connection,
    workflow: &ModerationWorkflow,
    user_id: i64,
    content: &str,
) -> Result<(SubmissionOutcome, User)> {
    let author = require_user(conn, user_id)?;
    if author.standing.is_banned {
        return Err(StorageError::Banned(user_id));
    }

    let outcome = workflow.evaluate(content, &author.standing);
    Ok((outcome, author))
}

/// Applies the enforcement decision to the author and returns the updated record.
fn enforce(conn: &Connection, author: User, outcome: &SubmissionOutcome) -> Result<User> {
    match outcome.decision.action {
        EnforcementAction::None => return Ok(author),
        EnforcementAction::Warn => {
            let count = UsersRepo::increment_warnings(conn, author.id)?;
            info!(user_id = author.id, warnings = count, "User warned");
        }
        EnforcementAction::Ban => {
            let mut standing = author.standing.clone();
            standing.ban(&outcome.decision.reason)?;
            UsersRepo::set_ban_state(conn, author.id, &standing)?;
            info!(user_id = author.id, reason = %outcome.decision.reason, "User banned");
        }
    }

    require_user(conn, author.id)
}

/// Loggable label for a flagged submission. Never derived from the content text.
fn flag_category(outcome: &SubmissionOutcome) -> &'static str {
    outcome.result.category_scores.highest().0.name()
}

fn log_submission(kind: &str, id: i64, user_id: i64, outcome: &SubmissionOutcome) {
    if outcome.flags.flagged_for_content {
        info!(
            kind,
            id,
            user_id,
            overall = outcome.result.overall,
            category = flag_category(outcome),
            "Content flagged for review"
        );
    } else {
        debug!(kind, id, user_id, "Content stored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muslimnet_core::{ContentModerator, EnforcementPolicy, ForbiddenWords, WorkflowError};
    use std::thread;

    fn workflow() -> ModerationWorkflow {
        ModerationWorkflow::new(
            ContentModerator::new(ForbiddenWords::new(["yasakkelime"]).unwrap()),
            Default::default(),
        )
    }

    fn setup() -> (Database, User) {
        let db = Database::in_memory().unwrap();
        let user = db.create_user(NewUser::new("ayse", "hash")).unwrap();
        (db, user)
    }

    #[test]
    fn test_clean_submission() {
        let (db, user) = setup();
        let submission = db
            .submit_post(&workflow(), user.id, "Bugün çok güzel bir gün, Allah'a şükür.")
            .unwrap();

        assert_eq!(submission.outcome.state(), ContentState::Clean);
        assert_eq!(submission.author.standing.warning_count, 0);
        assert_eq!(db.get_visible_posts(10, 0).unwrap().len(), 1);
        assert!(db.get_flagged_posts().unwrap().is_empty());
    }

    #[test]
    fn test_flagged_submission_warns_in_same_transaction() {
        let (db, user) = setup();
        let submission = db
            .submit_post(&workflow(), user.id, "bu bir yasakkelime içeriyor")
            .unwrap();

        assert!(submission.item.flags.flagged_for_content);
        assert_eq!(submission.outcome.decision.action, EnforcementAction::Warn);
        assert_eq!(submission.author.standing.warning_count, 1);

        let stored = db.get_user(user.id).unwrap().unwrap();
        assert_eq!(stored.standing.warning_count, 1);
        assert_eq!(db.get_flagged_posts().unwrap().len(), 1);
    }

    #[test]
    fn test_third_strike_escalates_to_ban() {
        let (db, user) = setup();
        let wf = workflow();

        for _ in 0..3 {
            db.submit_post(&wf, user.id, "yasakkelime").unwrap();
        }
        let author = db.get_user(user.id).unwrap().unwrap();
        assert_eq!(author.standing.warning_count, 3);
        assert!(!author.standing.is_banned);

        let fourth = db.submit_post(&wf, user.id, "yasakkelime").unwrap();
        assert_eq!(fourth.outcome.decision.action, EnforcementAction::Ban);
        assert!(fourth.author.standing.is_banned);
        assert_eq!(fourth.author.standing.warning_count, 3);

        let err = db.submit_post(&wf, user.id, "merhaba").unwrap_err();
        assert!(matches!(err, StorageError::Banned(_)));
    }

    #[test]
    fn test_concurrent_flagged_submissions_count_every_warning() {
        const THREADS: i64 = 8;
        const POSTS_PER_THREAD: i64 = 10;

        let (db, user) = setup();
        let policy = EnforcementPolicy {
            max_warnings: THREADS * POSTS_PER_THREAD + 1,
            ..Default::default()
        };
        let wf = ModerationWorkflow::new(
            ContentModerator::new(ForbiddenWords::new(["yasakkelime"]).unwrap()),
            policy,
        );

        let user_id = user.id;
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let db = db.clone();
                let wf = wf.clone();
                thread::spawn(move || {
                    for _ in 0..POSTS_PER_THREAD {
                        db.submit_post(&wf, user_id, "yasakkelime").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let author = db.get_user(user.id).unwrap().unwrap();
        assert_eq!(author.standing.warning_count, THREADS * POSTS_PER_THREAD);
        assert!(!author.standing.is_banned);
        assert_eq!(
            db.get_flagged_posts().unwrap().len() as i64,
            THREADS * POSTS_PER_THREAD
        );
    }

    #[test]
    fn test_flag_log_label_omits_matched_words() {
        let (db, user) = setup();
        let submission = db
            .submit_post(&workflow(), user.id, "bu bir yasakkelime içeriyor")
            .unwrap();

        let label = flag_category(&submission.outcome);
        assert_eq!(label, "insult/abuse");
        assert!(submission.outcome.result.reason.contains("yasakkelime"));
        assert!(!label.contains("yasakkelime"));
    }

    #[test]
    fn test_submission_by_missing_user() {
        let db = Database::in_memory().unwrap();
        let err = db.submit_post(&workflow(), 12, "merhaba").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_comment_submission_requires_post() {
        let (db, user) = setup();
        let err = db
            .submit_comment(&workflow(), 99, user.id, "merhaba")
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        let post = db.submit_post(&workflow(), user.id, "selam").unwrap().item;
        let comment = db
            .submit_comment(&workflow(), post.id, user.id, "yasakkelime")
            .unwrap();
        assert!(comment.item.flags.flagged_for_content);
        assert_eq!(db.get_flagged_comments().unwrap().len(), 1);
        assert_eq!(db.get_comments_for_post(post.id).unwrap().len(), 1);
    }

    #[test]
    fn test_approve_is_idempotent() {
        let (db, user) = setup();
        let post = db.submit_post(&workflow(), user.id, "yasakkelime").unwrap().item;
        let decision = ReviewDecision::from_approval(true, Some("ok".to_string()));

        let first = db.review_post(post.id, &decision).unwrap();
        let second = db.review_post(post.id, &decision).unwrap();
        assert_eq!(first, second);

        match second {
            ReviewOutcome::Approved(p) => {
                assert_eq!(p.flags.state(), ContentState::Approved);
                assert_eq!(p.flags.moderation_comment.as_deref(), Some("ok"));
            }
            ReviewOutcome::Removed => panic!("expected approval"),
        }
        assert!(db.get_flagged_posts().unwrap().is_empty());
    }

    #[test]
    fn test_reject_deletes_then_not_found() {
        let (db, user) = setup();
        let post = db.submit_post(&workflow(), user.id, "yasakkelime").unwrap().item;
        let reject = ReviewDecision::from_approval(false, None);

        assert_eq!(db.review_post(post.id, &reject).unwrap(), ReviewOutcome::Removed);
        assert!(db.get_post(post.id).unwrap().is_none());

        let err = db.review_post(post.id, &reject).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_review_of_clean_content_is_refused() {
        let (db, user) = setup();
        let post = db.submit_post(&workflow(), user.id, "merhaba").unwrap().item;

        for approve in [true, false] {
            let err = db
                .review_post(post.id, &ReviewDecision::from_approval(approve, None))
                .unwrap_err();
            assert!(matches!(
                err,
                StorageError::Workflow(WorkflowError::NotUnderReview)
            ));
        }

        let stored = db.get_post(post.id).unwrap().unwrap();
        assert_eq!(stored.flags.state(), ContentState::Clean);

        // Still eligible for rescan
        let stricter = ModerationWorkflow::new(
            ContentModerator::new(ForbiddenWords::new(["merhaba"]).unwrap()),
            Default::default(),
        );
        assert_eq!(db.rescan(&stricter).unwrap().flagged_posts, 1);
    }

    #[test]
    fn test_review_comment() {
        let (db, user) = setup();
        let post = db.submit_post(&workflow(), user.id, "selam").unwrap().item;
        let comment = db
            .submit_comment(&workflow(), post.id, user.id, "yasakkelime")
            .unwrap()
            .item;

        let reject = ReviewDecision::from_approval(false, None);
        assert_eq!(
            db.review_comment(comment.id, &reject).unwrap(),
            ReviewOutcome::Removed
        );
        assert!(db.get_comment(comment.id).unwrap().is_none());
    }

    #[test]
    fn test_ban_and_unban() {
        let (db, user) = setup();

        let err = db.ban_user(user.id, "   ").unwrap_err();
        assert!(matches!(err, StorageError::Workflow(_)));

        let banned = db.ban_user(user.id, "spam").unwrap();
        assert!(banned.standing.is_banned);
        assert_eq!(banned.standing.ban_reason.as_deref(), Some("spam"));

        let once = db.unban_user(user.id).unwrap();
        let twice = db.unban_user(user.id).unwrap();
        assert_eq!(once, twice);
        assert!(!twice.standing.is_banned);
        assert!(twice.standing.ban_reason.is_none());

        assert!(matches!(
            db.ban_user(404, "spam").unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[test]
    fn test_set_user_active() {
        let (db, user) = setup();
        let user = db.set_user_active(user.id, false).unwrap();
        assert!(!user.is_active);
        assert!(matches!(
            db.set_user_active(404, true).unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[test]
    fn test_unban_keeps_warnings() {
        let (db, user) = setup();
        db.submit_post(&workflow(), user.id, "yasakkelime").unwrap();
        db.ban_user(user.id, "manual").unwrap();

        let user = db.unban_user(user.id).unwrap();
        assert_eq!(user.standing.warning_count, 1);
    }

    #[test]
    fn test_rescan_flags_without_enforcement() {
        let (db, user) = setup();
        let post = db.submit_post(&workflow(), user.id, "eski yazı: yasakkelime").unwrap();
        assert!(post.item.flags.flagged_for_content);

        let clean = db.submit_post(&workflow(), user.id, "merhaba").unwrap().item;
        let stricter = ModerationWorkflow::new(
            ContentModerator::new(ForbiddenWords::new(["merhaba"]).unwrap()),
            Default::default(),
        );

        let summary = db.rescan(&stricter).unwrap();
        assert_eq!(summary.flagged_posts, 1);
        assert_eq!(summary.flagged_comments, 0);

        let rescanned = db.get_post(clean.id).unwrap().unwrap();
        assert!(rescanned.flags.flagged_for_content);

        // Only the original submission warned the author
        let author = db.get_user(user.id).unwrap().unwrap();
        assert_eq!(author.standing.warning_count, 1);
    }

    #[test]
    fn test_rescan_skips_approved() {
        let (db, user) = setup();
        let post = db.submit_post(&workflow(), user.id, "yasakkelime").unwrap().item;
        db.review_post(post.id, &ReviewDecision::from_approval(true, None))
            .unwrap();

        let summary = db.rescan(&workflow()).unwrap();
        assert_eq!(summary, RescanSummary::default());
    }

    #[test]
    fn test_moderation_stats() {
        let (db, user) = setup();
        let other = db.create_user(NewUser::new("ali", "hash")).unwrap();
        db.submit_post(&workflow(), user.id, "yasakkelime").unwrap();
        db.ban_user(other.id, "spam").unwrap();

        let stats = db.moderation_stats().unwrap();
        assert_eq!(
            stats,
            ModerationStats {
                flagged_posts: 1,
                flagged_comments: 0,
                warned_users: 1,
                banned_users: 1,
            }
        );
    }

    #[test]
    fn test_ensure_admin() {
        let db = Database::in_memory().unwrap();
        let admin = db.ensure_admin("admin", "hash").unwrap();
        assert_eq!(admin.role, Role::Admin);

        let again = db.ensure_admin("admin", "other").unwrap();
        assert_eq!(again.id, admin.id);
        assert_eq!(again.password_hash, "hash");

        db.create_user(NewUser::new("ayse", "h")).unwrap();
        let promoted = db.ensure_admin("ayse", "ignored").unwrap();
        assert_eq!(promoted.role, Role::Admin);
    }

    #[test]
    fn test_duplicate_username() {
        let (db, _) = setup();
        let err = db.create_user(NewUser::new("ayse", "x")).unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[test]
    fn test_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("muslimnet.db");

        {
            let db = Database::with_path(&path).unwrap();
            db.create_user(NewUser::new("ayse", "hash")).unwrap();
        }

        let db = Database::with_path(&path).unwrap();
        assert!(db.get_user_by_username("ayse").unwrap().is_some());
    }
}
