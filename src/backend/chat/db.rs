/**
 * Database Operations for Chats and Messages
 *
 * Every function takes the owning user's ID and every statement filters on
 * it, so a chat that belongs to someone else behaves exactly like a chat
 * that does not exist. No function here looks a chat up by ID alone.
 *
 * Ordering:
 * - chats newest first (`created_at DESC`, then insertion order)
 * - messages oldest first (`timestamp ASC`, then insertion order)
 */

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::shared::{ChatResponse, ChatSummary, MessageResponse, Sender};

/// A row of the `chats` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A row of the `messages` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    /// Attach the chat's messages for the client projection
    pub fn into_response(self, messages: Vec<MessageRecord>) -> ChatResponse {
        ChatResponse {
            id: self.id,
            title: self.title,
            user: self.user_id,
            created_at: self.created_at,
            messages: messages.into_iter().map(MessageResponse::from).collect(),
        }
    }
}

impl From<ChatRecord> for ChatSummary {
    fn from(chat: ChatRecord) -> Self {
        Self {
            id: chat.id,
            title: chat.title,
            user: chat.user_id,
            created_at: chat.created_at,
        }
    }
}

impl From<MessageRecord> for MessageResponse {
    fn from(message: MessageRecord) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            content: message.content,
            timestamp: message.timestamp,
        }
    }
}

/// List a user's chats, newest first
pub async fn list_chats(pool: &SqlitePool, owner: Uuid) -> Result<Vec<ChatRecord>, sqlx::Error> {
    sqlx::query_as::<_, ChatRecord>(
        r#"
        SELECT id, user_id, title, created_at
        FROM chats
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await
}

/// Find one of a user's chats
///
/// # Returns
/// `None` if the chat does not exist or belongs to another user
pub async fn find_chat(
    pool: &SqlitePool,
    owner: Uuid,
    chat_id: Uuid,
) -> Result<Option<ChatRecord>, sqlx::Error> {
    sqlx::query_as::<_, ChatRecord>(
        "SELECT id, user_id, title, created_at FROM chats WHERE id = ? AND user_id = ?",
    )
    .bind(chat_id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

/// Load the messages of one of a user's chats, oldest first
///
/// Returns an empty list for a chat the user does not own.
pub async fn load_messages(
    pool: &SqlitePool,
    owner: Uuid,
    chat_id: Uuid,
) -> Result<Vec<MessageRecord>, sqlx::Error> {
    sqlx::query_as::<_, MessageRecord>(
        r#"
        SELECT m.id, m.chat_id, m.sender, m.content, m.timestamp
        FROM messages m
        JOIN chats c ON c.id = m.chat_id
        WHERE m.chat_id = ? AND c.user_id = ?
        ORDER BY m.timestamp ASC, m.rowid ASC
        "#,
    )
    .bind(chat_id)
    .bind(owner)
    .fetch_all(pool)
    .await
}

/// Create a chat together with its first user message
///
/// Both rows are written in one transaction.
pub async fn insert_chat_with_message(
    pool: &SqlitePool,
    owner: Uuid,
    title: &str,
    content: &str,
) -> Result<(ChatRecord, MessageRecord), sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let chat = sqlx::query_as::<_, ChatRecord>(
        r#"
        INSERT INTO chats (id, user_id, title, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, user_id, title, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner)
    .bind(title)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let message = insert_message(&mut tx, chat.id, Sender::User, content, now).await?;

    tx.commit().await?;
    Ok((chat, message))
}

/// Append a user question and an AI answer to one of a user's chats
///
/// Ownership is re-checked inside the transaction, so a chat deleted
/// between the caller's lookup and this write is never resurrected.
/// Both messages share one timestamp; insertion order keeps the question
/// ahead of the answer.
///
/// # Returns
/// `None` if the chat does not exist or belongs to another user
pub async fn append_pair(
    pool: &SqlitePool,
    owner: Uuid,
    chat_id: Uuid,
    question: &str,
    answer: &str,
) -> Result<Option<(MessageRecord, MessageRecord)>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let owned: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM chats WHERE id = ? AND user_id = ?")
            .bind(chat_id)
            .bind(owner)
            .fetch_optional(&mut *tx)
            .await?;

    if owned.is_none() {
        tx.rollback().await?;
        return Ok(None);
    }

    let now = Utc::now();
    let asked = insert_message(&mut tx, chat_id, Sender::User, question, now).await?;
    let answered = insert_message(&mut tx, chat_id, Sender::Ai, answer, now).await?;

    tx.commit().await?;
    Ok(Some((asked, answered)))
}

async fn insert_message(
    tx: &mut Transaction<'_, Sqlite>,
    chat_id: Uuid,
    sender: Sender,
    content: &str,
    timestamp: DateTime<Utc>,
) -> Result<MessageRecord, sqlx::Error> {
    sqlx::query_as::<_, MessageRecord>(
        r#"
        INSERT INTO messages (id, chat_id, sender, content, timestamp)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, chat_id, sender, content, timestamp
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(chat_id)
    .bind(sender)
    .bind(content)
    .bind(timestamp)
    .fetch_one(&mut **tx)
    .await
}

/// Delete one of a user's chats and, by cascade, its messages
///
/// # Returns
/// `false` if nothing was deleted
pub async fn delete_chat(pool: &SqlitePool, owner: Uuid, chat_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chats WHERE id = ? AND user_id = ?")
        .bind(chat_id)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_support::{insert_user, memory_pool};

    async fn message_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_chat_with_message() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner").await;

        let (chat, message) = insert_chat_with_message(&pool, owner.id, "Hi", "Hi").await.unwrap();
        assert_eq!(chat.user_id, owner.id);
        assert_eq!(chat.title, "Hi");
        assert_eq!(message.chat_id, chat.id);
        assert_eq!(message.sender, Sender::User);
        assert_eq!(message.timestamp, chat.created_at);

        let messages = load_messages(&pool, owner.id, chat.id).await.unwrap();
        assert_eq!(messages, vec![message]);
    }

    #[tokio::test]
    async fn test_insert_for_missing_user_writes_nothing() {
        let pool = memory_pool().await;
        let result = insert_chat_with_message(&pool, Uuid::new_v4(), "Hi", "Hi").await;
        assert!(result.is_err());

        let chats: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chats")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(chats, 0);
        assert_eq!(message_count(&pool).await, 0);
    }

    /// Make any message insert with `content` fail inside SQLite
    async fn reject_message_content(pool: &SqlitePool, content: &str) {
        sqlx::query(&format!(
            "CREATE TRIGGER reject_marked_message BEFORE INSERT ON messages \
             WHEN NEW.content = '{content}' \
             BEGIN SELECT RAISE(ABORT, 'rejected message'); END"
        ))
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_failed_first_message_rolls_back_chat() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner").await;
        reject_message_content(&pool, "boom").await;

        let result = insert_chat_with_message(&pool, owner.id, "boom", "boom").await;
        assert!(result.is_err());

        assert!(list_chats(&pool, owner.id).await.unwrap().is_empty());
        assert_eq!(message_count(&pool).await, 0);

        // the pool is still usable afterwards
        insert_chat_with_message(&pool, owner.id, "Hi", "Hi").await.unwrap();
        assert_eq!(list_chats(&pool, owner.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_answer_rolls_back_question() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner").await;
        let (chat, _) = insert_chat_with_message(&pool, owner.id, "Hi", "Hi").await.unwrap();
        reject_message_content(&pool, "boom").await;

        let result = append_pair(&pool, owner.id, chat.id, "2+2?", "boom").await;
        assert!(result.is_err());

        let contents: Vec<String> = load_messages(&pool, owner.id, chat.id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["Hi".to_string()]);
    }

    #[tokio::test]
    async fn test_queries_are_scoped_to_owner() {
        let pool = memory_pool().await;
        let alice = insert_user(&pool, "alice").await;
        let bob = insert_user(&pool, "bob").await;
        let (chat, _) = insert_chat_with_message(&pool, alice.id, "Hi", "Hi").await.unwrap();

        assert!(find_chat(&pool, bob.id, chat.id).await.unwrap().is_none());
        assert!(list_chats(&pool, bob.id).await.unwrap().is_empty());
        assert!(load_messages(&pool, bob.id, chat.id).await.unwrap().is_empty());
        assert!(append_pair(&pool, bob.id, chat.id, "q", "a").await.unwrap().is_none());
        assert!(!delete_chat(&pool, bob.id, chat.id).await.unwrap());

        assert_eq!(message_count(&pool).await, 1);
        assert!(find_chat(&pool, alice.id, chat.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_append_pair_orders_question_before_answer() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner").await;
        let (chat, _) = insert_chat_with_message(&pool, owner.id, "Hi", "Hi").await.unwrap();

        let (asked, answered) = append_pair(&pool, owner.id, chat.id, "2+2?", "4")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(asked.timestamp, answered.timestamp);

        let messages = load_messages(&pool, owner.id, chat.id).await.unwrap();
        let contents: Vec<(&str, Sender)> = messages
            .iter()
            .map(|m| (m.content.as_str(), m.sender))
            .collect();
        assert_eq!(
            contents,
            vec![("Hi", Sender::User), ("2+2?", Sender::User), ("4", Sender::Ai)]
        );
    }

    #[tokio::test]
    async fn test_list_chats_newest_first() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner").await;
        let mut ids = Vec::new();
        for title in ["t1", "t2", "t3"] {
            let (chat, _) = insert_chat_with_message(&pool, owner.id, title, title).await.unwrap();
            ids.push(chat.id);
        }

        let titles: Vec<String> = list_chats(&pool, owner.id)
            .await
            .unwrap()
            .into_iter()
            .map(|chat| chat.title)
            .collect();
        assert_eq!(titles, vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_messages() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner").await;
        let (chat, _) = insert_chat_with_message(&pool, owner.id, "Hi", "Hi").await.unwrap();
        append_pair(&pool, owner.id, chat.id, "q", "a").await.unwrap();
        assert_eq!(message_count(&pool).await, 3);

        assert!(delete_chat(&pool, owner.id, chat.id).await.unwrap());
        assert_eq!(message_count(&pool).await, 0);
        assert!(find_chat(&pool, owner.id, chat.id).await.unwrap().is_none());
        assert!(!delete_chat(&pool, owner.id, chat.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_unknown_sender_value() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner").await;
        let (chat, _) = insert_chat_with_message(&pool, owner.id, "Hi", "Hi").await.unwrap();

        let result = sqlx::query(
            "INSERT INTO messages (id, chat_id, sender, content, timestamp) VALUES (?, ?, 'bot', 'x', ?)",
        )
        .bind(Uuid::new_v4())
        .bind(chat.id)
        .bind(Utc::now())
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
