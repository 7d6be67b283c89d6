mod common;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use blog_api::{
    error::ApiError,
    handlers,
    models::{ROLE_ADMIN, ROLE_USER, TodoRequest},
    pagination::PageParams,
};
use common::{principal, seed_user, test_state};
use tokio::test;

fn todo_request(title: &str) -> TodoRequest {
    TodoRequest {
        title: title.to_string(),
        completed: false,
    }
}

#[test]
async fn todos_are_private_to_their_owner() {
    let state = test_state();
    let alice = seed_user(&state, "alice", ROLE_USER).await;
    let bob = seed_user(&state, "bob", ROLE_USER).await;
    let root = seed_user(&state, "root", ROLE_ADMIN).await;

    let (status, Json(todo)) = handlers::todos::add_todo(
        principal(&alice),
        State(state.clone()),
        Json(todo_request("Water the plants")),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    // Even a plain read is refused for another user.
    let err = handlers::todos::get_todo(principal(&bob), State(state.clone()), Path(todo.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    // The owner and an admin both resolve it.
    assert!(
        handlers::todos::get_todo(principal(&alice), State(state.clone()), Path(todo.id))
            .await
            .is_ok()
    );
    assert!(
        handlers::todos::get_todo(principal(&root), State(state), Path(todo.id))
            .await
            .is_ok()
    );
}

#[test]
async fn listing_only_returns_own_todos() {
    let state = test_state();
    let alice = seed_user(&state, "alice", ROLE_USER).await;
    let bob = seed_user(&state, "bob", ROLE_USER).await;

    handlers::todos::add_todo(
        principal(&alice),
        State(state.clone()),
        Json(todo_request("Alice's errand")),
    )
    .await
    .unwrap();
    handlers::todos::add_todo(
        principal(&bob),
        State(state.clone()),
        Json(todo_request("Bob's errand")),
    )
    .await
    .unwrap();

    let Json(page) = handlers::todos::get_todos(
        principal(&alice),
        State(state),
        Query(PageParams::default()),
    )
    .await
    .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].title, "Alice's errand");
}

#[test]
async fn complete_and_uncomplete_toggle_the_flag() {
    let state = test_state();
    let alice = seed_user(&state, "alice", ROLE_USER).await;

    let (_, Json(todo)) = handlers::todos::add_todo(
        principal(&alice),
        State(state.clone()),
        Json(todo_request("Ship the release")),
    )
    .await
    .unwrap();
    assert!(!todo.completed);

    let Json(done) =
        handlers::todos::complete_todo(principal(&alice), State(state.clone()), Path(todo.id))
            .await
            .unwrap();
    assert!(done.completed);

    let Json(reopened) =
        handlers::todos::uncomplete_todo(principal(&alice), State(state), Path(todo.id))
            .await
            .unwrap();
    assert!(!reopened.completed);
}

#[test]
async fn non_owner_cannot_complete_todo() {
    let state = test_state();
    let alice = seed_user(&state, "alice", ROLE_USER).await;
    let bob = seed_user(&state, "bob", ROLE_USER).await;

    let (_, Json(todo)) = handlers::todos::add_todo(
        principal(&alice),
        State(state.clone()),
        Json(todo_request("Private task")),
    )
    .await
    .unwrap();

    let err = handlers::todos::complete_todo(principal(&bob), State(state), Path(todo.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[test]
async fn delete_todo_acknowledges_and_removes() {
    let state = test_state();
    let alice = seed_user(&state, "alice", ROLE_USER).await;

    let (_, Json(todo)) = handlers::todos::add_todo(
        principal(&alice),
        State(state.clone()),
        Json(todo_request("Disposable")),
    )
    .await
    .unwrap();

    let Json(ack) =
        handlers::todos::delete_todo(principal(&alice), State(state.clone()), Path(todo.id))
            .await
            .unwrap();
    assert_eq!(ack.message, "You successfully deleted todo");

    let err = handlers::todos::get_todo(principal(&alice), State(state), Path(todo.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}
