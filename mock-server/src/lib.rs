//! In-process stand-in for the public resource service.
//!
//! Serves the users collection plus the nested posts/comments/todos reads
//! over a fixed seed dataset, with the same route shapes and status codes
//! the real service uses. DTOs are defined independently from the client
//! crate; integration tests catch schema drift.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "postId")]
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Partial update; only the fields present in the JSON are applied. The id
/// the client echoes in the payload is ignored; the path segment wins.
#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

pub struct Store {
    pub users: HashMap<i64, User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub todos: Vec<Todo>,
    next_user_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

fn user(id: i64, name: &str, username: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
    }
}

fn post(id: i64, user_id: i64, title: &str) -> Post {
    Post {
        id,
        user_id,
        title: title.to_string(),
        body: format!("body of {title}"),
    }
}

fn comment(id: i64, post_id: i64, name: &str) -> Comment {
    Comment {
        id,
        post_id,
        name: name.to_string(),
        email: format!("commenter{id}@example.com"),
        body: format!("{name} says hello"),
    }
}

fn todo(id: i64, user_id: i64, title: &str, completed: bool) -> Todo {
    Todo {
        id,
        user_id,
        title: title.to_string(),
        completed,
    }
}

/// The fixed dataset every fresh server starts from: three users, posts for
/// two of them (user 1's latest post is id 3), comments on those posts, and
/// a mixed todo list for user 1.
pub fn seed() -> Store {
    let users = [
        user(1, "Ada Lovelace", "ada"),
        user(2, "Grace Hopper", "grace"),
        user(3, "Alan Turing", "alan"),
    ]
    .into_iter()
    .map(|u| (u.id, u))
    .collect();

    Store {
        users,
        posts: vec![
            post(1, 1, "First engine notes"),
            post(2, 2, "Compiler diary"),
            post(3, 1, "More engine notes"),
        ],
        comments: vec![
            comment(11, 1, "early reader"),
            comment(31, 3, "enthusiast"),
            comment(32, 3, "skeptic"),
        ],
        todos: vec![
            todo(1, 1, "Sketch the difference engine", false),
            todo(2, 1, "Answer correspondence", true),
            todo(3, 1, "Review lecture notes", false),
            todo(4, 2, "File bug report", true),
        ],
        next_user_id: 4,
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", axum::routing::patch(update_user).delete(delete_user))
        .route("/users/{id}/posts", get(user_posts))
        .route("/users/{id}/todos", get(user_todos))
        .route("/posts/{id}/comments", get(post_comments))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    let mut users: Vec<User> = store.users.values().cloned().collect();
    users.sort_by_key(|u| u.id);
    Json(users)
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    let id = store.next_user_id;
    store.next_user_id += 1;
    let user = User {
        id,
        name: input.name,
        username: input.username,
        email: input.email,
    };
    store.users.insert(id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(username) = input.username {
        user.username = username;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

// The nested reads return an empty array for unknown owners, like the real
// service.

async fn user_posts(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.iter().filter(|p| p.user_id == id).cloned().collect())
}

async fn user_todos(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.iter().filter(|t| t.user_id == id).cloned().collect())
}

async fn post_comments(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(store.comments.iter().filter(|c| c.post_id == id).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let store = seed();
        let mut post_ids: Vec<i64> = store.posts.iter().map(|p| p.id).collect();
        post_ids.dedup();
        assert_eq!(post_ids.len(), store.posts.len());
        assert!(store.users.keys().all(|&id| id < store.next_user_id));
    }

    #[test]
    fn owner_ids_serialize_camel_case() {
        let json = serde_json::to_value(&seed().posts[0]).unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("user_id").is_none());

        let json = serde_json::to_value(&seed().todos[0]).unwrap();
        assert_eq!(json["userId"], 1);
    }

    #[test]
    fn latest_post_of_user_one_is_id_three() {
        let store = seed();
        let max = store
            .posts
            .iter()
            .filter(|p| p.user_id == 1)
            .map(|p| p.id)
            .max()
            .unwrap();
        assert_eq!(max, 3);
    }
}
