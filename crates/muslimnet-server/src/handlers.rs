//! API route handlers.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use muslimnet_core::{ModerationResult, ReviewDecision};
use muslimnet_storage::{Comment, ModerationStats, NewUser, Post, RescanSummary, ReviewOutcome};
use tracing::{debug, info};

use crate::auth::{bearer_token, check_standing, AuthUser, ModeratorUser};
use crate::error::{ApiError, Result};
use crate::models::{
    BanRequest, CommentReviewResponse, CommentView, CommentsResponse, ContentRequest,
    CredentialsRequest, HealthResponse, LoginResponse, PostReviewResponse, PostView,
    PostsQuery, PostsResponse, ReviewRequest, UserResponse, UsersResponse,
};
use crate::state::AppState;

/// Longest accepted username, in characters.
const MAX_USERNAME_LENGTH: usize = 32;

/// GET /api/health - Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ===== Auth Handlers =====

/// POST /api/auth/register - Create a member account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("username cannot be empty".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "username must be at most {} characters",
            MAX_USERNAME_LENGTH
        )));
    }

    let hash = state.auth.hash_password(&req.password)?;
    let user = state.db.create_user(NewUser::new(username, hash))?;

    info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// POST /api/auth/login - Verify credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>> {
    let user = state
        .db
        .get_user_by_username(req.username.trim())?
        .ok_or(ApiError::InvalidCredentials)?;

    let is_valid = state
        .auth
        .verify_password(&req.password, &user.password_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;
    if !is_valid {
        return Err(ApiError::InvalidCredentials);
    }

    check_standing(&user)?;

    let token = state.auth.create_session(user.id, user.role);
    info!(user_id = user.id, "Login successful, session created");

    Ok(Json(LoginResponse {
        token: token.as_str().to_string(),
        user,
    }))
}

/// POST /api/auth/logout - End the current session.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
) -> StatusCode {
    if let Some(token) = bearer_token(&headers) {
        state.auth.logout(&token);
    }
    debug!(user_id = user.id, "Session ended");
    StatusCode::NO_CONTENT
}

// ===== Content Handlers =====

/// POST /api/posts - Create a post; moderation runs before it is stored.
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<ContentRequest>,
) -> Result<(StatusCode, Json<PostView>)> {
    let content = require_content(&req.content)?;
    debug!(user_id = user.id, content_len = content.len(), "Creating post");

    let submission = state.db.submit_post(&state.workflow, user.id, content)?;
    Ok((StatusCode::CREATED, Json(submission.item.into())))
}

/// GET /api/posts - Approved posts, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Result<Json<PostsResponse<PostView>>> {
    let posts = state
        .db
        .get_visible_posts(query.limit, query.offset)?
        .into_iter()
        .map(PostView::from)
        .collect();

    Ok(Json(PostsResponse { posts }))
}

/// POST /api/posts/:id/comments - Comment on a post.
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<i64>,
    Json(req): Json<ContentRequest>,
) -> Result<(StatusCode, Json<CommentView>)> {
    let content = require_content(&req.content)?;
    debug!(
        user_id = user.id,
        post_id,
        content_len = content.len(),
        "Creating comment"
    );

    let submission = state
        .db
        .submit_comment(&state.workflow, post_id, user.id, content)?;
    Ok((StatusCode::CREATED, Json(submission.item.into())))
}

/// GET /api/posts/:id/comments - Approved comments on a post.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<CommentsResponse<CommentView>>> {
    let comments = state
        .db
        .get_comments_for_post(post_id)?
        .into_iter()
        .map(CommentView::from)
        .collect();

    Ok(Json(CommentsResponse { comments }))
}

/// POST /api/moderation/check - Score content without storing anything.
pub async fn check_content(
    State(state): State<AppState>,
    Json(req): Json<ContentRequest>,
) -> Json<ModerationResult> {
    let result = state.workflow.moderator().moderate_content(&req.content);
    debug!(
        content_len = req.content.len(),
        flagged = result.flagged,
        overall = result.overall,
        "Dry-run moderation check"
    );
    Json(result)
}

fn require_content(content: &str) -> Result<&str> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ApiError::BadRequest("content cannot be empty".to_string()));
    }
    Ok(content)
}

// ===== Moderation Handlers =====

/// GET /api/admin/moderation/posts - Posts waiting for review.
pub async fn flagged_posts(
    State(state): State<AppState>,
    _moderator: ModeratorUser,
) -> Result<Json<PostsResponse<Post>>> {
    let posts = state.db.get_flagged_posts()?;
    Ok(Json(PostsResponse { posts }))
}

/// GET /api/admin/moderation/comments - Comments waiting for review.
pub async fn flagged_comments(
    State(state): State<AppState>,
    _moderator: ModeratorUser,
) -> Result<Json<CommentsResponse<Comment>>> {
    let comments = state.db.get_flagged_comments()?;
    Ok(Json(CommentsResponse { comments }))
}

/// POST /api/admin/moderation/posts/:id - Approve or remove a post.
pub async fn review_post(
    State(state): State<AppState>,
    ModeratorUser(moderator): ModeratorUser,
    Path(id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<PostReviewResponse>> {
    let decision = ReviewDecision::from_approval(req.is_approved, req.moderation_comment);
    let outcome = state.db.review_post(id, &decision)?;

    info!(
        post_id = id,
        moderator_id = moderator.id,
        approved = req.is_approved,
        "Post reviewed"
    );

    Ok(Json(match outcome {
        ReviewOutcome::Approved(post) => PostReviewResponse::Approved { post },
        ReviewOutcome::Removed => PostReviewResponse::Removed,
    }))
}

/// POST /api/admin/moderation/comments/:id - Approve or remove a comment.
pub async fn review_comment(
    State(state): State<AppState>,
    ModeratorUser(moderator): ModeratorUser,
    Path(id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<CommentReviewResponse>> {
    let decision = ReviewDecision::from_approval(req.is_approved, req.moderation_comment);
    let outcome = state.db.review_comment(id, &decision)?;

    info!(
        comment_id = id,
        moderator_id = moderator.id,
        approved = req.is_approved,
        "Comment reviewed"
    );

    Ok(Json(match outcome {
        ReviewOutcome::Approved(comment) => CommentReviewResponse::Approved { comment },
        ReviewOutcome::Removed => CommentReviewResponse::Removed,
    }))
}

/// POST /api/admin/moderation/rescan - Re-moderate clean content.
pub async fn rescan(
    State(state): State<AppState>,
    ModeratorUser(moderator): ModeratorUser,
) -> Result<Json<RescanSummary>> {
    info!(moderator_id = moderator.id, "Rescan requested");
    let summary = state.db.rescan(&state.workflow)?;
    Ok(Json(summary))
}

/// GET /api/admin/moderation/stats - Review queue and enforcement totals.
pub async fn moderation_stats(
    State(state): State<AppState>,
    _moderator: ModeratorUser,
) -> Result<Json<ModerationStats>> {
    let stats = state.db.moderation_stats()?;
    Ok(Json(stats))
}

// ===== User Administration Handlers =====

/// GET /api/admin/users - All accounts with their standing.
pub async fn list_users(
    State(state): State<AppState>,
    _moderator: ModeratorUser,
) -> Result<Json<UsersResponse>> {
    let users = state.db.get_all_users()?;
    Ok(Json(UsersResponse { users }))
}

/// POST /api/admin/users/:id/ban - Ban an account.
pub async fn ban_user(
    State(state): State<AppState>,
    ModeratorUser(moderator): ModeratorUser,
    Path(id): Path<i64>,
    Json(req): Json<BanRequest>,
) -> Result<Json<UserResponse>> {
    let user = state.db.ban_user(id, &req.reason)?;
    info!(user_id = id, moderator_id = moderator.id, "Ban applied");
    Ok(Json(UserResponse { user }))
}

/// POST /api/admin/users/:id/unban - Lift a ban.
pub async fn unban_user(
    State(state): State<AppState>,
    ModeratorUser(moderator): ModeratorUser,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    let user = state.db.unban_user(id)?;
    info!(user_id = id, moderator_id = moderator.id, "Ban lifted");
    Ok(Json(UserResponse { user }))
}

/// POST /api/admin/users/:id/deactivate - Close an account and end its sessions.
pub async fn deactivate_user(
    State(state): State<AppState>,
    ModeratorUser(moderator): ModeratorUser,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    if id == moderator.id {
        return Err(ApiError::BadRequest(
            "cannot deactivate your own account".to_string(),
        ));
    }

    let user = state.db.set_user_active(id, false)?;
    state.auth.logout_user(id);
    info!(user_id = id, moderator_id = moderator.id, "Account deactivated");
    Ok(Json(UserResponse { user }))
}

/// POST /api/admin/users/:id/activate - Reopen a deactivated account.
pub async fn activate_user(
    State(state): State<AppState>,
    ModeratorUser(moderator): ModeratorUser,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    let user = state.db.set_user_active(id, true)?;
    info!(user_id = id, moderator_id = moderator.id, "Account activated");
    Ok(Json(UserResponse { user }))
}
