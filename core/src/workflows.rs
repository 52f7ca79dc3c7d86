//! Multi-step read workflows layered on [`ResourceApi`].
//!
//! # Design
//! Both workflows are plain functions over the capability trait, so they run
//! unchanged against the real client or a fake. They perform no reporting
//! themselves: outcomes come back as values and the driver turns them into
//! console lines.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::client::ResourceApi;
use crate::error::ApiError;
use crate::types::{Post, Todo};

/// Successful result of [`save_latest_post_comments`].
#[derive(Debug)]
pub struct SavedComments {
    /// Where the comment file was written.
    pub path: PathBuf,
    /// The selected (most recent) post.
    pub post_id: i64,
    /// Number of comments persisted.
    pub count: usize,
}

/// Failure modes of the comment download, one per distinct report.
#[derive(Debug)]
pub enum CommentsError {
    /// The user has no posts, or the post list could not be fetched.
    NoPosts {
        user_id: i64,
        source: Option<ApiError>,
    },
    /// The comment fetch for the selected post failed.
    FetchComments { post_id: i64, source: ApiError },
    /// Writing the output file failed.
    Save { path: PathBuf, source: ApiError },
}

impl fmt::Display for CommentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentsError::NoPosts { user_id, source } => match source {
                Some(err) => write!(f, "no posts found for user id={user_id}: {err}"),
                None => write!(f, "no posts found for user id={user_id}"),
            },
            CommentsError::FetchComments { post_id, source } => {
                write!(f, "failed to fetch comments for post id={post_id}: {source}")
            }
            CommentsError::Save { path, source } => {
                write!(f, "failed to save comments to {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CommentsError {}

/// Fetch the posts of `user_id`, pick the most recent one (highest id), and
/// persist its comments as pretty-printed JSON under `out_dir`, overwriting
/// any previous file of the same name.
///
/// The filename is `user-{userId}-post-{postId}-comments.json`; the driver
/// passes the current working directory for `out_dir`.
pub fn save_latest_post_comments(
    api: &dyn ResourceApi,
    user_id: i64,
    out_dir: &Path,
) -> Result<SavedComments, CommentsError> {
    let posts = match api.posts_for_user(user_id) {
        Ok(posts) => posts,
        Err(err) => {
            return Err(CommentsError::NoPosts {
                user_id,
                source: Some(err),
            })
        }
    };
    let Some(latest) = latest_post(&posts) else {
        return Err(CommentsError::NoPosts {
            user_id,
            source: None,
        });
    };

    let post_id = latest.id;
    let comments = api
        .comments_for_post(post_id)
        .map_err(|source| CommentsError::FetchComments { post_id, source })?;

    let path = out_dir.join(format!("user-{user_id}-post-{post_id}-comments.json"));
    write_pretty_json(&path, &comments).map_err(|source| CommentsError::Save {
        path: path.clone(),
        source,
    })?;

    Ok(SavedComments {
        path,
        post_id,
        count: comments.len(),
    })
}

/// The post with the highest id. Ids are unique per the service contract;
/// should duplicates ever appear, the first-encountered maximum wins, which
/// is why this uses `reduce` with a strict comparison rather than
/// `max_by_key` (that one keeps the last maximum).
fn latest_post(posts: &[Post]) -> Option<&Post> {
    posts
        .iter()
        .reduce(|best, post| if post.id > best.id { post } else { best })
}

fn write_pretty_json<S: serde::Serialize>(path: &Path, value: &S) -> Result<(), ApiError> {
    let file = File::create(path).map_err(|e| ApiError::Io(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    writer.flush().map_err(|e| ApiError::Io(e.to_string()))
}

/// The user's todos that are not yet completed, in the order the service
/// returned them. A fetch failure propagates; the caller produces no
/// further output for it.
pub fn open_todos(api: &dyn ResourceApi, user_id: i64) -> Result<Vec<Todo>, ApiError> {
    let todos = api.todos_for_user(user_id)?;
    Ok(todos.into_iter().filter(|todo| !todo.completed).collect())
}
