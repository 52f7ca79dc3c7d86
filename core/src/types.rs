//! Domain records for the resource service.
//!
//! # Design
//! Field names mirror the service's JSON schema exactly; owner-id fields are
//! camelCase on the wire (`userId`, `postId`) and carry serde renames. Every
//! record is `#[serde(default)]` so a field absent from a payload decodes to
//! its zero value, matching the service's loose schema. Unknown fields (the
//! real service attaches address/phone/company objects to users) are dropped
//! on decode.

use serde::{Deserialize, Serialize};

/// A user account. `id <= 0` marks a record not yet created on the service;
/// the service assigns the real id on creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
}

/// A post owned by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// A comment attached to a post. May be serialized back out when persisting
/// a post's comment thread to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A todo item owned by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}
