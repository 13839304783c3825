//! `/users` resource.

use crate::client::{BffClient, ClientError, CreateUser, User};

impl BffClient {
    /// `GET /users`
    pub async fn fetch_all_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_list("/users", "users").await
    }

    /// `GET /users/{id}`
    pub async fn fetch_user(&self, user_id: u64) -> Result<User, ClientError> {
        self.get(&format!("/users/{}", user_id)).await
    }

    /// `POST /users/add`
    pub async fn create_user(&self, user: &CreateUser) -> Result<User, ClientError> {
        self.post("/users/add", user).await
    }
}
