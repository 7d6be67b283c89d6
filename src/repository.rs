use crate::error::ApiResult;
use crate::models::{
    Album, Category, Comment, NewUser, Photo, PhotoRequest, Post, PostRequest, Tag, Todo,
    TodoRequest, User,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations, allowing the
/// handlers to interact with the data layer without knowing the specific
/// implementation (Postgres, in-memory mock, etc.).
///
/// Listing methods take a LIMIT/OFFSET pair and are paired with a COUNT
/// method; rows come back ordered by creation time descending. Ownership and
/// role checks live in the handlers, so mutation methods here are
/// authorization-free primitives.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn get_user(&self, id: Uuid) -> ApiResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>>;
    // Signin accepts either identifier in one field.
    async fn get_user_by_username_or_email(&self, identifier: &str) -> ApiResult<Option<User>>;
    async fn username_exists(&self, username: &str) -> ApiResult<bool>;
    async fn email_exists(&self, email: &str) -> ApiResult<bool>;
    async fn create_user(&self, user: NewUser) -> ApiResult<User>;
    async fn update_user(&self, id: Uuid, user: NewUser) -> ApiResult<Option<User>>;
    async fn delete_user(&self, id: Uuid) -> ApiResult<bool>;
    // Admin action: grant or revoke the admin role.
    async fn set_user_role(&self, id: Uuid, role: &str) -> ApiResult<Option<User>>;
    async fn count_posts_by_user(&self, user_id: Uuid) -> ApiResult<i64>;
    async fn count_albums_by_user(&self, user_id: Uuid) -> ApiResult<i64>;

    // --- Posts ---
    async fn list_posts(&self, limit: i64, offset: i64) -> ApiResult<Vec<Post>>;
    async fn count_posts(&self) -> ApiResult<i64>;
    async fn posts_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Post>>;
    async fn posts_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Post>>;
    async fn count_posts_by_category(&self, category_id: Uuid) -> ApiResult<i64>;
    async fn posts_by_tag(&self, tag_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Post>>;
    async fn count_posts_by_tag(&self, tag_id: Uuid) -> ApiResult<i64>;
    async fn get_post(&self, id: Uuid) -> ApiResult<Option<Post>>;
    // Creates the post and resolves its tag names, creating missing tags.
    async fn create_post(&self, user_id: Uuid, req: PostRequest) -> ApiResult<Post>;
    // Field-level overwrite; replaces the tag association set.
    async fn update_post(&self, id: Uuid, req: PostRequest) -> ApiResult<Option<Post>>;
    async fn delete_post(&self, id: Uuid) -> ApiResult<bool>;
    async fn get_post_tags(&self, post_id: Uuid) -> ApiResult<Vec<String>>;

    // --- Comments ---
    async fn comments_by_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Comment>>;
    async fn count_comments_by_post(&self, post_id: Uuid) -> ApiResult<i64>;
    async fn get_comment(&self, id: Uuid) -> ApiResult<Option<Comment>>;
    async fn create_comment(&self, post_id: Uuid, user_id: Uuid, body: &str)
    -> ApiResult<Comment>;
    async fn update_comment(&self, id: Uuid, body: &str) -> ApiResult<Option<Comment>>;
    async fn delete_comment(&self, id: Uuid) -> ApiResult<bool>;

    // --- Categories ---
    async fn list_categories(&self, limit: i64, offset: i64) -> ApiResult<Vec<Category>>;
    async fn count_categories(&self) -> ApiResult<i64>;
    async fn get_category(&self, id: Uuid) -> ApiResult<Option<Category>>;
    async fn create_category(&self, user_id: Uuid, name: &str) -> ApiResult<Category>;
    async fn update_category(&self, id: Uuid, name: &str) -> ApiResult<Option<Category>>;
    async fn delete_category(&self, id: Uuid) -> ApiResult<bool>;

    // --- Tags ---
    async fn list_tags(&self, limit: i64, offset: i64) -> ApiResult<Vec<Tag>>;
    async fn count_tags(&self) -> ApiResult<i64>;
    async fn get_tag(&self, id: Uuid) -> ApiResult<Option<Tag>>;
    async fn create_tag(&self, user_id: Uuid, name: &str) -> ApiResult<Tag>;
    async fn update_tag(&self, id: Uuid, name: &str) -> ApiResult<Option<Tag>>;
    async fn delete_tag(&self, id: Uuid) -> ApiResult<bool>;

    // --- Albums ---
    async fn list_albums(&self, limit: i64, offset: i64) -> ApiResult<Vec<Album>>;
    async fn count_albums(&self) -> ApiResult<i64>;
    async fn albums_by_user(&self, user_id: Uuid, limit: i64, offset: i64)
    -> ApiResult<Vec<Album>>;
    async fn get_album(&self, id: Uuid) -> ApiResult<Option<Album>>;
    async fn create_album(&self, user_id: Uuid, title: &str) -> ApiResult<Album>;
    async fn update_album(&self, id: Uuid, title: &str) -> ApiResult<Option<Album>>;
    async fn delete_album(&self, id: Uuid) -> ApiResult<bool>;

    // --- Photos ---
    async fn list_photos(&self, limit: i64, offset: i64) -> ApiResult<Vec<Photo>>;
    async fn count_photos(&self) -> ApiResult<i64>;
    async fn photos_by_album(
        &self,
        album_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Photo>>;
    async fn count_photos_by_album(&self, album_id: Uuid) -> ApiResult<i64>;
    async fn get_photo(&self, id: Uuid) -> ApiResult<Option<Photo>>;
    async fn create_photo(&self, req: PhotoRequest) -> ApiResult<Photo>;
    async fn update_photo(&self, id: Uuid, req: PhotoRequest) -> ApiResult<Option<Photo>>;
    async fn delete_photo(&self, id: Uuid) -> ApiResult<bool>;

    // --- Todos ---
    async fn todos_by_user(&self, user_id: Uuid, limit: i64, offset: i64)
    -> ApiResult<Vec<Todo>>;
    async fn count_todos_by_user(&self, user_id: Uuid) -> ApiResult<i64>;
    async fn get_todo(&self, id: Uuid) -> ApiResult<Option<Todo>>;
    async fn create_todo(&self, user_id: Uuid, req: TodoRequest) -> ApiResult<Todo>;
    async fn update_todo(&self, id: Uuid, req: TodoRequest) -> ApiResult<Option<Todo>>;
    async fn set_todo_completed(&self, id: Uuid, completed: bool) -> ApiResult<Option<Todo>>;
    async fn delete_todo(&self, id: Uuid) -> ApiResult<bool>;
}

/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves a tag by name, creating it if missing. Tags created on the fly
    /// are owned by the post author.
    async fn get_or_create_tag(&self, user_id: Uuid, name: &str) -> ApiResult<Tag> {
        if let Some(tag) = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(tag);
        }
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, user_id, name, created_at, updated_at)
             VALUES ($1, $2, $3, NOW(), NOW())
             ON CONFLICT (name) DO UPDATE SET updated_at = tags.updated_at
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag)
    }

    /// Replaces the tag association set of a post.
    async fn set_post_tags(&self, post_id: Uuid, user_id: Uuid, names: &[String]) -> ApiResult<()> {
        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        for name in names {
            let tag = self.get_or_create_tag(user_id, name).await?;
            sqlx::query(
                "INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(post_id)
            .bind(tag.id)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    // --- USERS ---

    async fn get_user(&self, id: Uuid) -> ApiResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> ApiResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 OR email = $1")
                .bind(identifier)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn username_exists(&self, username: &str) -> ApiResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> ApiResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn create_user(&self, user: NewUser) -> ApiResult<User> {
        Ok(sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, first_name, last_name, password, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_user(&self, id: Uuid, user: NewUser) -> ApiResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>(
            "UPDATE users
             SET username = $2, email = $3, first_name = $4, last_name = $5,
                 password = $6, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_user(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_user_role(&self, id: Uuid, role: &str) -> ApiResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn count_posts_by_user(&self, user_id: Uuid) -> ApiResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn count_albums_by_user(&self, user_id: Uuid) -> ApiResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM albums WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    // --- POSTS ---

    async fn list_posts(&self, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        Ok(sqlx::query_as::<_, Post>(
            "SELECT * FROM posts ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_posts(&self) -> ApiResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn posts_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        Ok(sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn posts_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Post>> {
        Ok(sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE category_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_posts_by_category(&self, category_id: Uuid) -> ApiResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn posts_by_tag(&self, tag_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        Ok(sqlx::query_as::<_, Post>(
            "SELECT p.* FROM posts p
             JOIN post_tags pt ON pt.post_id = p.id
             WHERE pt.tag_id = $1
             ORDER BY p.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(tag_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_posts_by_tag(&self, tag_id: Uuid) -> ApiResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM post_tags WHERE tag_id = $1")
                .bind(tag_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn get_post(&self, id: Uuid) -> ApiResult<Option<Post>> {
        Ok(sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_post(&self, user_id: Uuid, req: PostRequest) -> ApiResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, user_id, category_id, title, body, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(req.category_id)
        .bind(&req.title)
        .bind(&req.body)
        .fetch_one(&self.pool)
        .await?;
        self.set_post_tags(post.id, user_id, &req.tags).await?;
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, req: PostRequest) -> ApiResult<Option<Post>> {
        let updated = sqlx::query_as::<_, Post>(
            "UPDATE posts
             SET title = $2, body = $3, category_id = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.body)
        .bind(req.category_id)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(ref post) = updated {
            self.set_post_tags(post.id, post.user_id, &req.tags).await?;
        }
        Ok(updated)
    }

    async fn delete_post(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn get_post_tags(&self, post_id: Uuid) -> ApiResult<Vec<String>> {
        Ok(sqlx::query_scalar(
            "SELECT t.name FROM tags t
             JOIN post_tags pt ON pt.tag_id = t.id
             WHERE pt.post_id = $1
             ORDER BY t.name ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?)
    }

    // --- COMMENTS ---

    async fn comments_by_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE post_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_comments_by_post(&self, post_id: Uuid) -> ApiResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn get_comment(&self, id: Uuid) -> ApiResult<Option<Comment>> {
        Ok(
            sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        body: &str,
    ) -> ApiResult<Comment> {
        Ok(sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, post_id, user_id, body, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NOW(), NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_comment(&self, id: Uuid, body: &str) -> ApiResult<Option<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(
            "UPDATE comments SET body = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_comment(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- CATEGORIES ---

    async fn list_categories(&self, limit: i64, offset: i64) -> ApiResult<Vec<Category>> {
        Ok(sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_categories(&self) -> ApiResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn get_category(&self, id: Uuid) -> ApiResult<Option<Category>> {
        Ok(
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_category(&self, user_id: Uuid, name: &str) -> ApiResult<Category> {
        Ok(sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, user_id, name, created_at, updated_at)
             VALUES ($1, $2, $3, NOW(), NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_category(&self, id: Uuid, name: &str) -> ApiResult<Option<Category>> {
        Ok(sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_category(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- TAGS ---

    async fn list_tags(&self, limit: i64, offset: i64) -> ApiResult<Vec<Tag>> {
        Ok(sqlx::query_as::<_, Tag>(
            "SELECT * FROM tags ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_tags(&self) -> ApiResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn get_tag(&self, id: Uuid) -> ApiResult<Option<Tag>> {
        Ok(sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_tag(&self, user_id: Uuid, name: &str) -> ApiResult<Tag> {
        self.get_or_create_tag(user_id, name).await
    }

    async fn update_tag(&self, id: Uuid, name: &str) -> ApiResult<Option<Tag>> {
        Ok(sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_tag(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- ALBUMS ---

    async fn list_albums(&self, limit: i64, offset: i64) -> ApiResult<Vec<Album>> {
        Ok(sqlx::query_as::<_, Album>(
            "SELECT * FROM albums ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_albums(&self) -> ApiResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM albums")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn albums_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Album>> {
        Ok(sqlx::query_as::<_, Album>(
            "SELECT * FROM albums WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_album(&self, id: Uuid) -> ApiResult<Option<Album>> {
        Ok(
            sqlx::query_as::<_, Album>("SELECT * FROM albums WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_album(&self, user_id: Uuid, title: &str) -> ApiResult<Album> {
        Ok(sqlx::query_as::<_, Album>(
            "INSERT INTO albums (id, user_id, title, created_at, updated_at)
             VALUES ($1, $2, $3, NOW(), NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_album(&self, id: Uuid, title: &str) -> ApiResult<Option<Album>> {
        Ok(sqlx::query_as::<_, Album>(
            "UPDATE albums SET title = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_album(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- PHOTOS ---

    async fn list_photos(&self, limit: i64, offset: i64) -> ApiResult<Vec<Photo>> {
        Ok(sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_photos(&self) -> ApiResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM photos")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn photos_by_album(
        &self,
        album_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Photo>> {
        Ok(sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos WHERE album_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(album_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_photos_by_album(&self, album_id: Uuid) -> ApiResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE album_id = $1")
                .bind(album_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn get_photo(&self, id: Uuid) -> ApiResult<Option<Photo>> {
        Ok(
            sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_photo(&self, req: PhotoRequest) -> ApiResult<Photo> {
        Ok(sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (id, album_id, title, url, thumbnail_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(req.album_id)
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.thumbnail_url)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_photo(&self, id: Uuid, req: PhotoRequest) -> ApiResult<Option<Photo>> {
        Ok(sqlx::query_as::<_, Photo>(
            "UPDATE photos
             SET title = $2, url = $3, thumbnail_url = $4, album_id = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.thumbnail_url)
        .bind(req.album_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_photo(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- TODOS ---

    async fn todos_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Todo>> {
        Ok(sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_todos_by_user(&self, user_id: Uuid) -> ApiResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn get_todo(&self, id: Uuid) -> ApiResult<Option<Todo>> {
        Ok(sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_todo(&self, user_id: Uuid, req: TodoRequest) -> ApiResult<Todo> {
        Ok(sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (id, user_id, title, completed, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NOW(), NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&req.title)
        .bind(req.completed)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_todo(&self, id: Uuid, req: TodoRequest) -> ApiResult<Option<Todo>> {
        Ok(sqlx::query_as::<_, Todo>(
            "UPDATE todos SET title = $2, completed = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&req.title)
        .bind(req.completed)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn set_todo_completed(&self, id: Uuid, completed: bool) -> ApiResult<Option<Todo>> {
        Ok(sqlx::query_as::<_, Todo>(
            "UPDATE todos SET completed = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_todo(&self, id: Uuid) -> ApiResult<bool> {
        let res = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
