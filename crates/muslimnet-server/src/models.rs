//! API request and response models.

use chrono::{DateTime, Utc};
use muslimnet_storage::{Comment, Post, User};
use serde::{Deserialize, Serialize};

/// Request body for POST /api/auth/register and /api/auth/login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response body for POST /api/auth/register.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Response body for POST /api/auth/login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for later requests.
    pub token: String,
    pub user: User,
}

/// Request body for creating a post or comment, and for dry-run checks.
#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

/// Query parameters for GET /api/posts.
#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    /// Maximum number of posts to return (default: 50).
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// A post as other members see it. Moderation fields are never exposed here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

/// A comment as other members see it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// Response body for GET /api/posts.
#[derive(Debug, Serialize)]
pub struct PostsResponse<T> {
    pub posts: Vec<T>,
}

/// Response body for comment listings.
#[derive(Debug, Serialize)]
pub struct CommentsResponse<T> {
    pub comments: Vec<T>,
}

/// Response body for GET /api/admin/users.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Request body for the admin review endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub is_approved: bool,
    #[serde(default)]
    pub moderation_comment: Option<String>,
}

/// Response body for POST /api/admin/moderation/posts/:id.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PostReviewResponse {
    Approved { post: Post },
    Removed,
}

/// Response body for POST /api/admin/moderation/comments/:id.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CommentReviewResponse {
    Approved { comment: Comment },
    Removed,
}

/// Request body for POST /api/admin/users/:id/ban.
#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub reason: String,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
