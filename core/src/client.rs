//! Blocking client for the resource service.
//!
//! # Design
//! `ApiClient` holds a base URL and an injected [`Transport`] and carries no
//! other state between calls. Every operation builds an [`HttpRequest`],
//! executes it through the transport, gates on the uniform [`is_success`]
//! predicate, and decodes the body. The full operation set lives behind the
//! [`ResourceApi`] trait so workflows and the driver can run against a fake.
//!
//! Each operation is attempted exactly once; there are no retries.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{is_success, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Comment, Post, Todo, User};

/// The operations the resource service offers, as seen by callers.
///
/// Implemented by [`ApiClient`] for real traffic and by test fakes.
pub trait ResourceApi {
    /// Create `user` on the service and return the stored record, including
    /// the id the service assigned.
    fn create_user(&self, user: &User) -> Result<User, ApiError>;

    /// Partially update `user` under its id. Fails with
    /// [`ApiError::InvalidArgument`] before any network call when
    /// `user.id <= 0`.
    fn update_user(&self, user: &User) -> Result<User, ApiError>;

    /// Delete the user with `id`, discarding any response body. `Ok(())`
    /// exactly when the status was in [200,300).
    fn delete_user(&self, id: i64) -> Result<(), ApiError>;

    /// All users, in the order the service returns them.
    fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// All posts owned by `user_id`.
    fn posts_for_user(&self, user_id: i64) -> Result<Vec<Post>, ApiError>;

    /// All comments attached to `post_id`.
    fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, ApiError>;

    /// All todos owned by `user_id`.
    fn todos_for_user(&self, user_id: i64) -> Result<Vec<Todo>, ApiError>;
}

/// Synchronous client for the resource service.
pub struct ApiClient<T: Transport> {
    base_url: String,
    transport: T,
}

impl ApiClient<UreqTransport> {
    /// Client against `base_url` using the default blocking transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::default())
    }
}

impl<T: Transport> ApiClient<T> {
    /// Client with an explicit transport, the seam used by tests.
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    /// Execute a bodyless GET against `url` and decode the JSON body.
    fn get_json<D: DeserializeOwned>(&self, url: String) -> Result<D, ApiError> {
        let request = HttpRequest::new(url, HttpMethod::Get, None)?;
        let response = self.transport.execute(&request)?;
        check_status(&response)?;
        decode(&response)
    }
}

impl<T: Transport> ResourceApi for ApiClient<T> {
    fn create_user(&self, user: &User) -> Result<User, ApiError> {
        let body = encode(user)?;
        let request = HttpRequest::new(self.users_url(), HttpMethod::Post, Some(body))?;
        let response = self.transport.execute(&request)?;
        check_status(&response)?;
        decode(&response)
    }

    fn update_user(&self, user: &User) -> Result<User, ApiError> {
        if user.id <= 0 {
            return Err(ApiError::InvalidArgument(format!(
                "invalid user id for update: {}",
                user.id
            )));
        }
        let body = encode(user)?;
        let url = format!("{}/{}", self.users_url(), user.id);
        let request = HttpRequest::new(url, HttpMethod::Patch, Some(body))?;
        let response = self.transport.execute(&request)?;
        check_status(&response)?;
        decode(&response)
    }

    fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.users_url(), id);
        let request = HttpRequest::new(url, HttpMethod::Delete, None)?;
        let response = self.transport.execute(&request)?;
        check_status(&response)
    }

    fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json(self.users_url())
    }

    fn posts_for_user(&self, user_id: i64) -> Result<Vec<Post>, ApiError> {
        self.get_json(format!("{}/users/{user_id}/posts", self.base_url))
    }

    fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.get_json(format!("{}/posts/{post_id}/comments", self.base_url))
    }

    fn todos_for_user(&self, user_id: i64) -> Result<Vec<Todo>, ApiError> {
        self.get_json(format!("{}/users/{user_id}/todos", self.base_url))
    }
}

/// Gate on the uniform success predicate; non-success keeps the raw status
/// and body for the report.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if is_success(response.status) {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

fn encode<S: serde::Serialize>(value: &S) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Transport fake: serves queued responses and records every request
    /// it was asked to execute.
    struct MockTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                responses: RefCell::new(VecDeque::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn reply(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        fn fail(self) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Transport("connection refused".to_string())));
            self
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("no queued response")
        }
    }

    fn client(transport: MockTransport) -> ApiClient<MockTransport> {
        ApiClient::with_transport("http://localhost:3000", transport)
    }

    fn demo_user(id: i64) -> User {
        User {
            id,
            name: "John Smith".to_string(),
            username: "John.Smith".to_string(),
            email: "smith@example.com".to_string(),
        }
    }

    #[test]
    fn create_user_posts_to_users_endpoint() {
        let c = client(MockTransport::new().reply(
            201,
            r#"{"id":11,"name":"John Smith","username":"John.Smith","email":"smith@example.com"}"#,
        ));
        let created = c.create_user(&demo_user(0)).unwrap();
        assert_eq!(created.id, 11);
        assert_eq!(created.name, "John Smith");

        let requests = c.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://localhost:3000/users");
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 0);
        assert_eq!(body["username"], "John.Smith");
    }

    #[test]
    fn create_user_failure_status_is_an_error_not_a_default_record() {
        let c = client(MockTransport::new().reply(500, "internal error"));
        let err = c.create_user(&demo_user(0)).unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 500, .. }));
    }

    #[test]
    fn create_user_transport_failure_propagates() {
        let c = client(MockTransport::new().fail());
        let err = c.create_user(&demo_user(0)).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn update_user_patches_by_id() {
        let c = client(MockTransport::new().reply(
            200,
            r#"{"id":11,"name":"Steve Goldman","username":"John.Smith","email":"smith@example.com"}"#,
        ));
        let updated = c.update_user(&demo_user(11)).unwrap();
        assert_eq!(updated.name, "Steve Goldman");

        let requests = c.transport.requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Patch);
        assert_eq!(requests[0].url, "http://localhost:3000/users/11");
    }

    #[test]
    fn update_user_with_non_positive_id_never_touches_the_network() {
        for id in [0, -3] {
            let c = client(MockTransport::new());
            let err = c.update_user(&demo_user(id)).unwrap_err();
            assert!(matches!(err, ApiError::InvalidArgument(_)));
            assert!(c.transport.requests.borrow().is_empty());
        }
    }

    #[test]
    fn delete_user_ok_iff_status_successful_regardless_of_body() {
        for status in [200, 204, 299] {
            let c = client(MockTransport::new().reply(status, "ignored junk"));
            assert!(c.delete_user(11).is_ok());
        }
        for status in [199, 300, 404, 500] {
            let c = client(MockTransport::new().reply(status, ""));
            let err = c.delete_user(11).unwrap_err();
            assert!(matches!(err, ApiError::HttpStatus { status: s, .. } if s == status));
        }
    }

    #[test]
    fn delete_user_targets_the_id_route_without_body() {
        let c = client(MockTransport::new().reply(200, "{}"));
        c.delete_user(7).unwrap();
        let requests = c.transport.requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].url, "http://localhost:3000/users/7");
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn list_users_preserves_service_order() {
        let c = client(MockTransport::new().reply(
            200,
            r#"[{"id":2,"name":"Grace Hopper"},{"id":1,"name":"Ada Lovelace"}]"#,
        ));
        let users = c.list_users().unwrap();
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn list_users_bad_json_is_a_decode_error() {
        let c = client(MockTransport::new().reply(200, "not json"));
        let err = c.list_users().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn nested_collection_routes() {
        let c = client(MockTransport::new().reply(200, "[]"));
        c.posts_for_user(5).unwrap();
        assert_eq!(
            c.transport.requests.borrow()[0].url,
            "http://localhost:3000/users/5/posts"
        );

        let c = client(MockTransport::new().reply(200, "[]"));
        c.comments_for_post(42).unwrap();
        assert_eq!(
            c.transport.requests.borrow()[0].url,
            "http://localhost:3000/posts/42/comments"
        );

        let c = client(MockTransport::new().reply(200, "[]"));
        c.todos_for_user(5).unwrap();
        assert_eq!(
            c.transport.requests.borrow()[0].url,
            "http://localhost:3000/users/5/todos"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = ApiClient::with_transport(
            "http://localhost:3000/",
            MockTransport::new().reply(200, "[]"),
        );
        c.list_users().unwrap();
        assert_eq!(
            c.transport.requests.borrow()[0].url,
            "http://localhost:3000/users"
        );
    }
}
