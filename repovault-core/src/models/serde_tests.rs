//! Serde tests for the forge representations.
//!
//! These verify that unknown API fields survive the fetch → archive →
//! persist round-trip via the flattened extras map, and that the archived
//! forms replace the unresolved comment reference.

use serde_json::json;

use crate::{ArchivedComment, Comment, Issue, Release, Repository, User};

// ============================================================================
// Repository
// ============================================================================

#[test]
fn test_repository_preserves_unknown_fields() {
    let payload = json!({
        "name": "widget",
        "owner": { "login": "octocat", "id": 1 },
        "private": false,
        "stargazers_count": 42,
        "default_branch": "main"
    });

    let repo: Repository = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(repo.name, "widget");
    assert_eq!(repo.owner.login, "octocat");
    assert_eq!(repo.full_name(), "octocat/widget");

    let back = serde_json::to_value(&repo).unwrap();
    assert_eq!(back, payload);
}

// ============================================================================
// Issue / Comment
// ============================================================================

#[test]
fn test_issue_deserializes_count_and_url() {
    let payload = json!({
        "id": 9001,
        "number": 7,
        "body": "see attachment",
        "comments": 2,
        "comments_url": "https://api.github.com/repos/octocat/widget/issues/7/comments",
        "state": "open",
        "title": "Broken widget"
    });

    let issue: Issue = serde_json::from_value(payload).unwrap();
    assert_eq!(issue.id, 9001);
    assert_eq!(issue.comments, 2);
    assert_eq!(issue.extra["title"], "Broken widget");
}

#[test]
fn test_issue_body_may_be_null() {
    let payload = json!({
        "id": 1,
        "number": 1,
        "body": null,
        "comments": 0,
        "comments_url": "https://example.invalid/comments"
    });

    let issue: Issue = serde_json::from_value(payload).unwrap();
    assert!(issue.body.is_none());
}

#[test]
fn test_archived_issue_replaces_count_with_list() {
    let issue: Issue = serde_json::from_value(json!({
        "id": 5,
        "number": 3,
        "body": "original",
        "comments": 1,
        "comments_url": "https://example.invalid/comments",
        "state": "closed"
    }))
    .unwrap();

    let comments = vec![Comment::new(11, Some("hello".to_string())).into_archived(Some("hello".to_string()))];
    let archived = issue.into_archived(Some("rewritten".to_string()), comments);

    let value = serde_json::to_value(&archived).unwrap();
    // The count is gone; the comments field is now the resolved list.
    assert!(value["comments"].is_array());
    assert_eq!(value["comments"].as_array().unwrap().len(), 1);
    assert_eq!(value["comments"][0]["id"], 11);
    assert_eq!(value["body"], "rewritten");
    // Unknown fields survived the transformation.
    assert_eq!(value["state"], "closed");
}

#[test]
fn test_archived_comment_keeps_extras() {
    let comment: Comment = serde_json::from_value(json!({
        "id": 77,
        "body": "a",
        "user": { "login": "octocat" }
    }))
    .unwrap();

    let archived: ArchivedComment = comment.into_archived(Some("b".to_string()));
    let value = serde_json::to_value(&archived).unwrap();
    assert_eq!(value["body"], "b");
    assert_eq!(value["user"]["login"], "octocat");
}

// ============================================================================
// Release
// ============================================================================

#[test]
fn test_release_assets_default_to_empty() {
    let payload = json!({
        "id": 3,
        "tag_name": "v1.0.0",
        "body": "notes"
    });

    let release: Release = serde_json::from_value(payload).unwrap();
    assert!(release.assets.is_empty());
}

#[test]
fn test_release_roundtrip_with_assets() {
    let payload = json!({
        "id": 3,
        "tag_name": "v1.0.0",
        "body": "notes",
        "assets": [
            {
                "name": "widget-linux-x86_64.tar.gz",
                "url": "https://api.github.com/repos/octocat/widget/releases/assets/10",
                "size": 12345
            }
        ],
        "draft": false
    });

    let release: Release = serde_json::from_value(payload).unwrap();
    assert_eq!(release.assets.len(), 1);
    assert_eq!(release.assets[0].name, "widget-linux-x86_64.tar.gz");

    let archived = release.into_archived(Some("notes".to_string()));
    let value = serde_json::to_value(&archived).unwrap();
    assert_eq!(value["assets"][0]["size"], 12345);
    assert_eq!(value["draft"], false);
}

// ============================================================================
// User
// ============================================================================

#[test]
fn test_user_roundtrip() {
    let payload = json!({
        "login": "octocat",
        "id": 583231,
        "followers": 9000
    });

    let user: User = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(user.login, "octocat");
    assert_eq!(serde_json::to_value(&user).unwrap(), payload);
}
