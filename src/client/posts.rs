//! `/posts` resource.

use crate::client::{BffClient, ClientError, CreatePost, Post};

impl BffClient {
    /// `GET /posts`
    pub async fn fetch_all_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.get_list("/posts", "posts").await
    }

    /// `GET /posts/{id}`
    pub async fn fetch_post(&self, post_id: u64) -> Result<Post, ClientError> {
        self.get(&format!("/posts/{}", post_id)).await
    }

    /// `POST /posts/add`
    pub async fn create_post(&self, post: &CreatePost) -> Result<Post, ClientError> {
        self.post("/posts/add", post).await
    }
}
