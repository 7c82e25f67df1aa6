use std::collections::BTreeMap;

use chrono::{FixedOffset, TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

use blog_core::domain::{NewComment, NewPost, NewUser, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, Session, UserRepository};

use crate::database::PostgresSession;
use crate::database::entity::{post, user};

type Row = BTreeMap<&'static str, Value>;

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn ann() -> user::Model {
    user::Model {
        id: 1,
        name: "Ann".to_owned(),
        email: "a@x.com".to_owned(),
    }
}

fn user_post_row(post_id: i32, title: &str, body: &str) -> Row {
    BTreeMap::from([
        ("user_id", Value::from(1_i32)),
        ("user_name", Value::from("Ann")),
        ("user_email", Value::from("a@x.com")),
        ("post_id", Value::from(post_id)),
        ("title", Value::from(title)),
        ("body", Value::from(body)),
    ])
}

#[tokio::test]
async fn test_find_user_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![ann()]])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.users().find_by_id(1).await.unwrap();

    assert_eq!(
        result,
        Some(User {
            id: 1,
            name: "Ann".to_owned(),
            email: "a@x.com".to_owned(),
        })
    );
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.posts().find_by_id(999).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_create_user_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: 15,
            ..ann()
        }]])
        .into_connection();
    let session = PostgresSession::new(db);

    let id = session
        .users()
        .create(NewUser {
            name: "Ann".to_owned(),
            email: "a@x.com".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(id, 15);
}

#[tokio::test]
async fn test_list_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post::Model {
                id: 1,
                user_id: 1,
                title: "Hi".to_owned(),
                body: "B".to_owned(),
            },
            post::Model {
                id: 2,
                user_id: 1,
                title: "Again".to_owned(),
                body: "C".to_owned(),
            },
        ]])
        .into_connection();
    let session = PostgresSession::new(db);

    let posts = session.posts().list().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].title, "Again");
}

#[tokio::test]
async fn test_update_counts_affected_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(1), exec(0)])
        .into_connection();
    let session = PostgresSession::new(db);
    let draft = NewPost {
        user_id: 1,
        title: "Hi".to_owned(),
        body: "Edited".to_owned(),
    };

    session.posts().update(1, draft.clone()).await.unwrap();
    let missing = session.posts().update(42, draft).await;

    assert!(matches!(missing, Err(RepoError::NotFound("Post"))));
}

#[tokio::test]
async fn test_update_missing_comment_names_resource() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(0)])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session
        .comments()
        .update(
            5,
            NewComment {
                post_id: 1,
                body: "x".to_owned(),
            },
        )
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Comment not found");
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(1), exec(0)])
        .into_connection();
    let session = PostgresSession::new(db);

    session.users().delete(1).await.unwrap();
    let second = session.users().delete(1).await;

    assert!(matches!(second, Err(RepoError::NotFound("User"))));
}

#[tokio::test]
async fn test_find_posts_reshapes_joined_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            user_post_row(1, "Hi", "B"),
            user_post_row(2, "Again", "C"),
        ]])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.users().find_posts(1).await.unwrap();

    assert_eq!(result.user.name, "Ann");
    assert_eq!(result.user.email, "a@x.com");
    let ids: Vec<i32> = result.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_find_posts_falls_back_to_user_lookup() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<Row>::new()])
        .append_query_results(vec![vec![ann()]])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.users().find_posts(1).await.unwrap();

    assert_eq!(result.user.id, 1);
    assert!(result.posts.is_empty());
}

#[tokio::test]
async fn test_find_posts_for_missing_user() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<Row>::new()])
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.users().find_posts(999).await;

    assert!(matches!(result, Err(RepoError::NotFound("User"))));
}

#[tokio::test]
async fn test_find_comments_reshapes_joined_rows() {
    let created_at = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .unwrap();
    let row: Row = BTreeMap::from([
        ("post_id", Value::from(3_i32)),
        ("user_id", Value::from(1_i32)),
        ("title", Value::from("Hi")),
        ("post_body", Value::from("B")),
        ("comment_id", Value::from(9_i32)),
        ("comment_body", Value::from("Nice")),
        ("created_at", Value::from(created_at)),
    ]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.posts().find_comments(3).await.unwrap();

    assert_eq!(
        result.post,
        Post {
            id: 3,
            user_id: 1,
            title: "Hi".to_owned(),
            body: "B".to_owned(),
        }
    );
    assert_eq!(result.comments.len(), 1);
    assert_eq!(result.comments[0].body, "Nice");
    assert_eq!(
        result.comments[0].created_at,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_find_comments_falls_back_to_post_lookup() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<Row>::new()])
        .append_query_results(vec![vec![post::Model {
            id: 3,
            user_id: 1,
            title: "Hi".to_owned(),
            body: "B".to_owned(),
        }]])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.posts().find_comments(3).await.unwrap();

    assert_eq!(result.post.id, 3);
    assert_eq!(result.post.title, "Hi");
    assert!(result.comments.is_empty());
}

#[tokio::test]
async fn test_find_comments_for_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<Row>::new()])
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let session = PostgresSession::new(db);

    let result = session.posts().find_comments(999).await;

    assert!(matches!(result, Err(RepoError::NotFound("Post"))));
}

#[tokio::test]
async fn test_session_repositories_share_one_connection() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![ann()]])
        .append_query_results(vec![vec![post::Model {
            id: 2,
            user_id: 1,
            title: "Hi".to_owned(),
            body: "B".to_owned(),
        }]])
        .into_connection();
    let session = PostgresSession::new(db);

    let user = session.users().find_by_id(1).await.unwrap();
    let post = session.posts().find_by_id(2).await.unwrap();

    assert_eq!(user.map(|u| u.name), Some("Ann".to_owned()));
    assert_eq!(post.map(|p| p.user_id), Some(1));
}
