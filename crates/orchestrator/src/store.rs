//! The persistence operations a chat turn needs.

use async_trait::async_trait;
use database::{
    alarm, category, message, task, Alarm, Category, Database, DatabaseError, Message, NewAlarm,
    NewMessage, NewTask, Task,
};

/// Owner-scoped persistence used by the orchestrator.
///
/// Implemented for [`Database`]; tests wrap it to inject failures.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn create_message(&self, owner_id: i64, message: &NewMessage) -> Result<Message, DatabaseError>;

    /// Messages ordered oldest first; with a limit, the most recent `limit`.
    async fn list_messages(&self, owner_id: i64, limit: Option<i64>) -> Result<Vec<Message>, DatabaseError>;

    async fn create_task(&self, owner_id: i64, task: &NewTask) -> Result<Task, DatabaseError>;

    async fn create_alarm(&self, owner_id: i64, alarm: &NewAlarm) -> Result<Alarm, DatabaseError>;

    /// Categories ordered by id; the first is the owner's default.
    async fn list_categories(&self, owner_id: i64) -> Result<Vec<Category>, DatabaseError>;
}

#[async_trait]
impl EntityStore for Database {
    async fn create_message(&self, owner_id: i64, new: &NewMessage) -> Result<Message, DatabaseError> {
        message::create_message(self.pool(), owner_id, new).await
    }

    async fn list_messages(&self, owner_id: i64, limit: Option<i64>) -> Result<Vec<Message>, DatabaseError> {
        message::list_messages(self.pool(), owner_id, limit).await
    }

    async fn create_task(&self, owner_id: i64, new: &NewTask) -> Result<Task, DatabaseError> {
        task::create_task(self.pool(), owner_id, new).await
    }

    async fn create_alarm(&self, owner_id: i64, new: &NewAlarm) -> Result<Alarm, DatabaseError> {
        alarm::create_alarm(self.pool(), owner_id, new).await
    }

    async fn list_categories(&self, owner_id: i64) -> Result<Vec<Category>, DatabaseError> {
        category::list_categories(self.pool(), owner_id).await
    }
}
