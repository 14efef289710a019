use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub tag: String,
    pub author: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub text: String,
    pub tag: String,
    pub author: Option<String>,
}

impl NewMessage {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        NewMessage {
            text: text.into(),
            tag: tag.into(),
            author: None,
        }
    }

    pub fn by(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }
}

pub async fn save(db_pool: &SqlitePool, message: NewMessage) -> sqlx::Result<Message> {
    let id = sqlx::query("INSERT INTO messages (text,tag,author) VALUES (?,?,?)")
        .bind(&message.text)
        .bind(&message.tag)
        .bind(&message.author)
        .execute(db_pool)
        .await?
        .last_insert_rowid();

    Ok(Message {
        id,
        text: message.text,
        tag: message.tag,
        author: message.author,
    })
}

pub async fn find_all(db_pool: &SqlitePool) -> sqlx::Result<Vec<Message>> {
    sqlx::query_as("SELECT id,text,tag,author FROM messages ORDER BY id")
        .fetch_all(db_pool)
        .await
}

pub async fn find_by_tag(db_pool: &SqlitePool, tag: &str) -> sqlx::Result<Vec<Message>> {
    sqlx::query_as("SELECT id,text,tag,author FROM messages WHERE tag=? ORDER BY id")
        .bind(tag)
        .fetch_all(db_pool)
        .await
}
