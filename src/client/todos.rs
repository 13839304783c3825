//! `/todos` resource.

use crate::client::{BffClient, ClientError, CreateTodo, Todo};

impl BffClient {
    /// `GET /todos`
    pub async fn fetch_all_todos(&self) -> Result<Vec<Todo>, ClientError> {
        self.get_list("/todos", "todos").await
    }

    /// `GET /todos/{id}`
    pub async fn fetch_todo(&self, todo_id: u64) -> Result<Todo, ClientError> {
        self.get(&format!("/todos/{}", todo_id)).await
    }

    /// `POST /todos/add`
    pub async fn create_todo(&self, todo: &CreateTodo) -> Result<Todo, ClientError> {
        self.post("/todos/add", todo).await
    }

    /// `DELETE /todos/{id}`. Returns the deleted todo.
    pub async fn delete_todo(&self, todo_id: u64) -> Result<Todo, ClientError> {
        self.delete(&format!("/todos/{}", todo_id)).await
    }
}
