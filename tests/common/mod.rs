#![allow(dead_code)]

use async_trait::async_trait;
use blog_api::{
    AppState,
    auth::{AuthUser, hash_password},
    config::AppConfig,
    error::ApiResult,
    models::{
        Album, Category, Comment, NewUser, Photo, PhotoRequest, Post, PostRequest, Tag, Todo,
        TodoRequest, User,
    },
    repository::Repository,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// The plaintext seeded into every test user, so signin flows can be
/// exercised end to end.
pub const TEST_PASSWORD: &str = "letmein123";

// --- IN-MEMORY REPOSITORY ---

// Backing store for the mock. Rows are appended in creation order with
// strictly increasing timestamps, so "newest first" is simply reverse
// insertion order.
#[derive(Default)]
struct Store {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    post_tags: Vec<(Uuid, Uuid)>,
    albums: Vec<Album>,
    photos: Vec<Photo>,
    todos: Vec<Todo>,
    seq: i64,
}

impl Store {
    fn stamp(&mut self) -> DateTime<Utc> {
        self.seq += 1;
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(self.seq)
    }
}

/// InMemoryRepository
///
/// A full trait implementation over plain Vecs, standing in for Postgres in
/// handler tests. Handlers only see `Arc<dyn Repository>`, so they cannot
/// tell the difference. Semantics mirror the SQL: listings come back newest
/// first, deletes report whether a row was removed, and parent deletes
/// cascade to their children.
#[derive(Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
}

fn page_of<T: Clone>(rows: Vec<&T>, limit: i64, offset: i64) -> Vec<T> {
    rows.into_iter()
        .rev()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl Repository for InMemoryRepository {
    // --- Users ---

    async fn get_user(&self, id: Uuid) -> ApiResult<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> ApiResult<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> ApiResult<bool> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> ApiResult<bool> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().any(|u| u.email == email))
    }

    async fn create_user(&self, user: NewUser) -> ApiResult<User> {
        let mut store = self.store.lock().unwrap();
        let now = store.stamp();
        let row = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password: user.password,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        store.users.push(row.clone());
        Ok(row)
    }

    async fn update_user(&self, id: Uuid, user: NewUser) -> ApiResult<Option<User>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.users.iter_mut().find(|u| u.id == id).map(|row| {
            row.username = user.username;
            row.email = user.email;
            row.first_name = user.first_name;
            row.last_name = user.last_name;
            row.password = user.password;
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        // FK cascades.
        store.posts.retain(|p| p.user_id != id);
        store.comments.retain(|c| c.user_id != id);
        let album_ids: Vec<Uuid> = store
            .albums
            .iter()
            .filter(|a| a.user_id == id)
            .map(|a| a.id)
            .collect();
        store.albums.retain(|a| a.user_id != id);
        store.photos.retain(|p| !album_ids.contains(&p.album_id));
        store.todos.retain(|t| t.user_id != id);
        Ok(store.users.len() < before)
    }

    async fn set_user_role(&self, id: Uuid, role: &str) -> ApiResult<Option<User>> {
        let mut store = self.store.lock().unwrap();
        Ok(store.users.iter_mut().find(|u| u.id == id).map(|row| {
            row.role = role.to_string();
            row.clone()
        }))
    }

    async fn count_posts_by_user(&self, user_id: Uuid) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.posts.iter().filter(|p| p.user_id == user_id).count() as i64)
    }

    async fn count_albums_by_user(&self, user_id: Uuid) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.albums.iter().filter(|a| a.user_id == user_id).count() as i64)
    }

    // --- Posts ---

    async fn list_posts(&self, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        let store = self.store.lock().unwrap();
        Ok(page_of(store.posts.iter().collect(), limit, offset))
    }

    async fn count_posts(&self) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.posts.len() as i64)
    }

    async fn posts_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        let store = self.store.lock().unwrap();
        let rows = store.posts.iter().filter(|p| p.user_id == user_id).collect();
        Ok(page_of(rows, limit, offset))
    }

    async fn posts_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Post>> {
        let store = self.store.lock().unwrap();
        let rows = store
            .posts
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .collect();
        Ok(page_of(rows, limit, offset))
    }

    async fn count_posts_by_category(&self, category_id: Uuid) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store
            .posts
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .count() as i64)
    }

    async fn posts_by_tag(&self, tag_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Post>> {
        let store = self.store.lock().unwrap();
        let post_ids: Vec<Uuid> = store
            .post_tags
            .iter()
            .filter(|(_, t)| *t == tag_id)
            .map(|(p, _)| *p)
            .collect();
        let rows = store
            .posts
            .iter()
            .filter(|p| post_ids.contains(&p.id))
            .collect();
        Ok(page_of(rows, limit, offset))
    }

    async fn count_posts_by_tag(&self, tag_id: Uuid) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.post_tags.iter().filter(|(_, t)| *t == tag_id).count() as i64)
    }

    async fn get_post(&self, id: Uuid) -> ApiResult<Option<Post>> {
        let store = self.store.lock().unwrap();
        Ok(store.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create_post(&self, user_id: Uuid, req: PostRequest) -> ApiResult<Post> {
        let mut store = self.store.lock().unwrap();
        let now = store.stamp();
        let post = Post {
            id: Uuid::new_v4(),
            user_id,
            category_id: req.category_id,
            title: req.title,
            body: req.body,
            created_at: now,
            updated_at: now,
        };
        store.posts.push(post.clone());
        set_tags(&mut store, post.id, user_id, &req.tags);
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, req: PostRequest) -> ApiResult<Option<Post>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        let updated = store.posts.iter_mut().find(|p| p.id == id).map(|row| {
            row.title = req.title.clone();
            row.body = req.body.clone();
            row.category_id = req.category_id;
            row.updated_at = now;
            row.clone()
        });
        if let Some(ref post) = updated {
            set_tags(&mut store, post.id, post.user_id, &req.tags);
        }
        Ok(updated)
    }

    async fn delete_post(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.posts.len();
        store.posts.retain(|p| p.id != id);
        store.comments.retain(|c| c.post_id != id);
        store.post_tags.retain(|(p, _)| *p != id);
        Ok(store.posts.len() < before)
    }

    async fn get_post_tags(&self, post_id: Uuid) -> ApiResult<Vec<String>> {
        let store = self.store.lock().unwrap();
        let mut names: Vec<String> = store
            .post_tags
            .iter()
            .filter(|(p, _)| *p == post_id)
            .filter_map(|(_, t)| store.tags.iter().find(|tag| tag.id == *t))
            .map(|tag| tag.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    // --- Comments ---

    async fn comments_by_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Comment>> {
        let store = self.store.lock().unwrap();
        let rows = store
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        Ok(page_of(rows, limit, offset))
    }

    async fn count_comments_by_post(&self, post_id: Uuid) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.comments.iter().filter(|c| c.post_id == post_id).count() as i64)
    }

    async fn get_comment(&self, id: Uuid) -> ApiResult<Option<Comment>> {
        let store = self.store.lock().unwrap();
        Ok(store.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        body: &str,
    ) -> ApiResult<Comment> {
        let mut store = self.store.lock().unwrap();
        let now = store.stamp();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        store.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, id: Uuid, body: &str) -> ApiResult<Option<Comment>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.comments.iter_mut().find(|c| c.id == id).map(|row| {
            row.body = body.to_string();
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn delete_comment(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.comments.len();
        store.comments.retain(|c| c.id != id);
        Ok(store.comments.len() < before)
    }

    // --- Categories ---

    async fn list_categories(&self, limit: i64, offset: i64) -> ApiResult<Vec<Category>> {
        let store = self.store.lock().unwrap();
        Ok(page_of(store.categories.iter().collect(), limit, offset))
    }

    async fn count_categories(&self) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.categories.len() as i64)
    }

    async fn get_category(&self, id: Uuid) -> ApiResult<Option<Category>> {
        let store = self.store.lock().unwrap();
        Ok(store.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create_category(&self, user_id: Uuid, name: &str) -> ApiResult<Category> {
        let mut store = self.store.lock().unwrap();
        let now = store.stamp();
        let category = Category {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        store.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: Uuid, name: &str) -> ApiResult<Option<Category>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.categories.iter_mut().find(|c| c.id == id).map(|row| {
            row.name = name.to_string();
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn delete_category(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.categories.len();
        store.categories.retain(|c| c.id != id);
        // Posts keep existing with the category reference cleared.
        for post in store.posts.iter_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(store.categories.len() < before)
    }

    // --- Tags ---

    async fn list_tags(&self, limit: i64, offset: i64) -> ApiResult<Vec<Tag>> {
        let store = self.store.lock().unwrap();
        Ok(page_of(store.tags.iter().collect(), limit, offset))
    }

    async fn count_tags(&self) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.tags.len() as i64)
    }

    async fn get_tag(&self, id: Uuid) -> ApiResult<Option<Tag>> {
        let store = self.store.lock().unwrap();
        Ok(store.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn create_tag(&self, user_id: Uuid, name: &str) -> ApiResult<Tag> {
        let mut store = self.store.lock().unwrap();
        Ok(get_or_create_tag(&mut store, user_id, name))
    }

    async fn update_tag(&self, id: Uuid, name: &str) -> ApiResult<Option<Tag>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.tags.iter_mut().find(|t| t.id == id).map(|row| {
            row.name = name.to_string();
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn delete_tag(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.tags.len();
        store.tags.retain(|t| t.id != id);
        store.post_tags.retain(|(_, t)| *t != id);
        Ok(store.tags.len() < before)
    }

    // --- Albums ---

    async fn list_albums(&self, limit: i64, offset: i64) -> ApiResult<Vec<Album>> {
        let store = self.store.lock().unwrap();
        Ok(page_of(store.albums.iter().collect(), limit, offset))
    }

    async fn count_albums(&self) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.albums.len() as i64)
    }

    async fn albums_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Album>> {
        let store = self.store.lock().unwrap();
        let rows = store.albums.iter().filter(|a| a.user_id == user_id).collect();
        Ok(page_of(rows, limit, offset))
    }

    async fn get_album(&self, id: Uuid) -> ApiResult<Option<Album>> {
        let store = self.store.lock().unwrap();
        Ok(store.albums.iter().find(|a| a.id == id).cloned())
    }

    async fn create_album(&self, user_id: Uuid, title: &str) -> ApiResult<Album> {
        let mut store = self.store.lock().unwrap();
        let now = store.stamp();
        let album = Album {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        store.albums.push(album.clone());
        Ok(album)
    }

    async fn update_album(&self, id: Uuid, title: &str) -> ApiResult<Option<Album>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.albums.iter_mut().find(|a| a.id == id).map(|row| {
            row.title = title.to_string();
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn delete_album(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.albums.len();
        store.albums.retain(|a| a.id != id);
        store.photos.retain(|p| p.album_id != id);
        Ok(store.albums.len() < before)
    }

    // --- Photos ---

    async fn list_photos(&self, limit: i64, offset: i64) -> ApiResult<Vec<Photo>> {
        let store = self.store.lock().unwrap();
        Ok(page_of(store.photos.iter().collect(), limit, offset))
    }

    async fn count_photos(&self) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.photos.len() as i64)
    }

    async fn photos_by_album(
        &self,
        album_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Photo>> {
        let store = self.store.lock().unwrap();
        let rows = store
            .photos
            .iter()
            .filter(|p| p.album_id == album_id)
            .collect();
        Ok(page_of(rows, limit, offset))
    }

    async fn count_photos_by_album(&self, album_id: Uuid) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.photos.iter().filter(|p| p.album_id == album_id).count() as i64)
    }

    async fn get_photo(&self, id: Uuid) -> ApiResult<Option<Photo>> {
        let store = self.store.lock().unwrap();
        Ok(store.photos.iter().find(|p| p.id == id).cloned())
    }

    async fn create_photo(&self, req: PhotoRequest) -> ApiResult<Photo> {
        let mut store = self.store.lock().unwrap();
        let now = store.stamp();
        let photo = Photo {
            id: Uuid::new_v4(),
            album_id: req.album_id,
            title: req.title,
            url: req.url,
            thumbnail_url: req.thumbnail_url,
            created_at: now,
            updated_at: now,
        };
        store.photos.push(photo.clone());
        Ok(photo)
    }

    async fn update_photo(&self, id: Uuid, req: PhotoRequest) -> ApiResult<Option<Photo>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.photos.iter_mut().find(|p| p.id == id).map(|row| {
            row.title = req.title.clone();
            row.url = req.url.clone();
            row.thumbnail_url = req.thumbnail_url.clone();
            row.album_id = req.album_id;
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn delete_photo(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.photos.len();
        store.photos.retain(|p| p.id != id);
        Ok(store.photos.len() < before)
    }

    // --- Todos ---

    async fn todos_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> ApiResult<Vec<Todo>> {
        let store = self.store.lock().unwrap();
        let rows = store.todos.iter().filter(|t| t.user_id == user_id).collect();
        Ok(page_of(rows, limit, offset))
    }

    async fn count_todos_by_user(&self, user_id: Uuid) -> ApiResult<i64> {
        let store = self.store.lock().unwrap();
        Ok(store.todos.iter().filter(|t| t.user_id == user_id).count() as i64)
    }

    async fn get_todo(&self, id: Uuid) -> ApiResult<Option<Todo>> {
        let store = self.store.lock().unwrap();
        Ok(store.todos.iter().find(|t| t.id == id).cloned())
    }

    async fn create_todo(&self, user_id: Uuid, req: TodoRequest) -> ApiResult<Todo> {
        let mut store = self.store.lock().unwrap();
        let now = store.stamp();
        let todo = Todo {
            id: Uuid::new_v4(),
            user_id,
            title: req.title,
            completed: req.completed,
            created_at: now,
            updated_at: now,
        };
        store.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: Uuid, req: TodoRequest) -> ApiResult<Option<Todo>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.todos.iter_mut().find(|t| t.id == id).map(|row| {
            row.title = req.title.clone();
            row.completed = req.completed;
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn set_todo_completed(&self, id: Uuid, completed: bool) -> ApiResult<Option<Todo>> {
        let mut store = self.store.lock().unwrap();
        let now = Utc::now();
        Ok(store.todos.iter_mut().find(|t| t.id == id).map(|row| {
            row.completed = completed;
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn delete_todo(&self, id: Uuid) -> ApiResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.todos.len();
        store.todos.retain(|t| t.id != id);
        Ok(store.todos.len() < before)
    }
}

fn get_or_create_tag(store: &mut Store, user_id: Uuid, name: &str) -> Tag {
    if let Some(tag) = store.tags.iter().find(|t| t.name == name) {
        return tag.clone();
    }
    let now = store.stamp();
    let tag = Tag {
        id: Uuid::new_v4(),
        user_id,
        name: name.to_string(),
        created_at: now,
        updated_at: now,
    };
    store.tags.push(tag.clone());
    tag
}

fn set_tags(store: &mut Store, post_id: Uuid, user_id: Uuid, names: &[String]) {
    store.post_tags.retain(|(p, _)| *p != post_id);
    for name in names {
        let tag = get_or_create_tag(store, user_id, name);
        store.post_tags.push((post_id, tag.id));
    }
}

// --- TEST UTILITIES ---

/// Creates an AppState backed by a fresh in-memory repository.
pub fn test_state() -> AppState {
    AppState {
        repo: Arc::new(InMemoryRepository::default()),
        config: AppConfig::default(),
    }
}

/// Registers a user with the given role and a known password.
pub async fn seed_user(state: &AppState, username: &str, role: &str) -> User {
    state
        .repo
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
        })
        .await
        .unwrap()
}

/// Builds the AuthUser a handler would receive for this user.
pub fn principal(user: &User) -> AuthUser {
    AuthUser {
        id: user.id,
        role: user.role.clone(),
    }
}
