use crate::error::{RemoteError, Result};
use crate::store::RemoteStore;
use async_trait::async_trait;
use engage_protocol::{Comment, NewComment, Post, PostListing, SearchFilter, UserProfile};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

/// The live HTTP store. Identity travels as the `access_token` cookie the
/// sign-in flow issued; anonymous clients simply omit it.
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = &self.access_token {
            builder = builder.header(header::COOKIE, format!("access_token={token}"));
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        let err = rejection(status, &body);
        log::debug!("request rejected: {err}");
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response
            .bytes()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Shape of the like-toggle response; the rest of the comment payload is
/// ignored because the like set is all that gets reconciled.
#[derive(Debug, Deserialize)]
struct LikeBody {
    #[serde(default)]
    likes: Vec<String>,
}

/// Turn a non-success response into the boundary error, preferring the
/// server's own `{message}` wording when the body carries one.
fn rejection(status: u16, body: &[u8]) -> RemoteError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    RemoteError::Rejected { status, message }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.json(self.request(
            Method::GET,
            &format!("/api/comment/getPostComments/{post_id}"),
        ))
        .await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.json(
            self.request(Method::POST, "/api/comment/create")
                .json(comment),
        )
        .await
    }

    async fn edit_comment(&self, comment_id: &str, content: &str) -> Result<()> {
        self.send(
            self.request(Method::PUT, &format!("/api/comment/editComment/{comment_id}"))
                .json(&json!({ "content": content })),
        )
        .await?;
        Ok(())
    }

    async fn toggle_like(&self, comment_id: &str) -> Result<Vec<String>> {
        let body: LikeBody = self
            .json(self.request(
                Method::PUT,
                &format!("/api/comment/likeComment/{comment_id}"),
            ))
            .await?;
        Ok(body.likes)
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.send(self.request(
            Method::DELETE,
            &format!("/api/comment/deleteComment/{comment_id}"),
        ))
        .await?;
        Ok(())
    }

    async fn posts_page(&self, filter: &SearchFilter, start_index: usize) -> Result<Vec<Post>> {
        let listing: PostListing = self
            .json(self.request(
                Method::GET,
                &format!("/api/post/getposts?{}", filter.page_query(start_index)),
            ))
            .await?;
        Ok(listing.posts)
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let listing: PostListing = self
            .json(self.request(
                Method::GET,
                &format!("/api/post/getposts?slug={}", urlencoding::encode(slug)),
            ))
            .await?;
        Ok(listing.posts.into_iter().next())
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let listing: PostListing = self
            .json(self.request(Method::GET, &format!("/api/post/getposts?limit={limit}")))
            .await?;
        Ok(listing.posts)
    }

    async fn user_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.json(self.request(Method::GET, &format!("/api/user/{user_id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_joins_without_double_slash() {
        let store = HttpRemoteStore::new("http://localhost:3000/");
        assert_eq!(store.url("/api/user/u1"), "http://localhost:3000/api/user/u1");
    }

    #[test]
    fn test_rejection_prefers_server_message() {
        let err = rejection(403, br#"{"success": false, "message": "You are not allowed"}"#);
        match err {
            RemoteError::Rejected { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "You are not allowed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_falls_back_to_status_text() {
        let err = rejection(502, b"<html>bad gateway</html>");
        assert_eq!(err.to_string(), "request failed with status 502");
    }
}
