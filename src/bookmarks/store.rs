use anyhow::Result;
use libsql::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::sanitize::sanitize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: serde_json::Number,
}

impl Bookmark {
    /// The response view: title and description with HTML-significant
    /// characters neutralized. The stored row is untouched.
    pub fn into_view(mut self) -> Bookmark {
        self.title = sanitize(&self.title);
        self.description = sanitize(&self.description);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: JsonValue,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBookmark {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<JsonValue>,
}

/// Store gateway for the bookmarks table. Every operation is a single
/// round-trip, single-statement call against the shared connection.
pub struct Bookmarks<'a> {
    conn: &'a Connection,
}

impl<'a> Bookmarks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Bookmark>> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            ORDER BY id
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn insert(&self, input: CreateBookmark) -> Result<Bookmark> {
        let query = r#"
            INSERT INTO bookmarks (title, url, description, rating)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, url, description, rating
        "#;

        let params: Vec<libsql::Value> = vec![
            input.title.into(),
            input.url.into(),
            input.description.into(),
            rating_param(&input.rating),
        ];

        let mut rows = self.conn.query(query, params).await?;

        if let Some(row) = rows.next().await? {
            Ok(row_to_bookmark(&row)?)
        } else {
            anyhow::bail!("Failed to create bookmark")
        }
    }

    /// Applies the provided fields to one row, leaving the rest untouched.
    /// Returns the affected-row count; an empty change set is a no-op.
    pub async fn update_by_id(&self, id: i64, changes: UpdateBookmark) -> Result<u64> {
        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = changes.title {
            updates.push("title = ?");
            params.push(title.into());
        }
        if let Some(url) = changes.url {
            updates.push("url = ?");
            params.push(url.into());
        }
        if let Some(description) = changes.description {
            updates.push("description = ?");
            params.push(description.into());
        }
        if let Some(rating) = &changes.rating {
            updates.push("rating = ?");
            params.push(rating_param(rating));
        }

        if updates.is_empty() {
            return Ok(0);
        }

        updates.push("updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')");
        params.push(id.into());

        let query = format!("UPDATE bookmarks SET {} WHERE id = ?", updates.join(", "));

        Ok(self.conn.execute(&query, params).await?)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected)
    }
}

fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark> {
    Ok(Bookmark {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        description: row.get::<Option<String>>(3)?.unwrap_or_default(),
        rating: coerce_rating(row.get_value(4)?),
    })
}

// Ratings have been stored as both text and numbers over time; responses
// always carry a number. Unreadable values coerce to 0.
fn coerce_rating(value: libsql::Value) -> serde_json::Number {
    match value {
        libsql::Value::Integer(n) => n.into(),
        libsql::Value::Real(r) => serde_json::Number::from_f64(r).unwrap_or_else(|| 0.into()),
        libsql::Value::Text(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                n.into()
            } else if let Ok(f) = s.parse::<f64>() {
                serde_json::Number::from_f64(f).unwrap_or_else(|| 0.into())
            } else {
                0.into()
            }
        }
        _ => 0.into(),
    }
}

// The payload may carry the rating as a number or as text; it is stored in
// its native shape and coerced on the way out.
fn rating_param(value: &JsonValue) -> libsql::Value {
    match value {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                libsql::Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                libsql::Value::Real(f)
            } else {
                libsql::Value::Null
            }
        }
        JsonValue::String(s) => libsql::Value::Text(s.clone()),
        JsonValue::Bool(b) => libsql::Value::Integer(*b as i64),
        other => libsql::Value::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_stored_text_ratings_to_numbers() {
        assert_eq!(
            coerce_rating(libsql::Value::Text("4".to_string())),
            serde_json::Number::from(4)
        );
        assert_eq!(
            coerce_rating(libsql::Value::Text("4.5".to_string())),
            serde_json::Number::from_f64(4.5).unwrap()
        );
        assert_eq!(
            coerce_rating(libsql::Value::Text("not a number".to_string())),
            serde_json::Number::from(0)
        );
    }

    #[test]
    fn coerces_numeric_ratings_as_is() {
        assert_eq!(
            coerce_rating(libsql::Value::Integer(3)),
            serde_json::Number::from(3)
        );
        assert_eq!(
            coerce_rating(libsql::Value::Real(2.5)),
            serde_json::Number::from_f64(2.5).unwrap()
        );
    }

    #[test]
    fn view_sanitizes_title_and_description_only() {
        let bookmark = Bookmark {
            id: 911,
            title: r#"Malicious <script>alert("xss")</script>"#.to_string(),
            url: "www.fake-place-does-not-exist.website".to_string(),
            description: "Bad image <img src=x>".to_string(),
            rating: 2.into(),
        };

        let view = bookmark.into_view();
        assert_eq!(
            view.title,
            r#"Malicious &lt;script&gt;alert("xss")&lt;/script&gt;"#
        );
        assert_eq!(view.description, "Bad image &lt;img src=x&gt;");
        assert_eq!(view.url, "www.fake-place-does-not-exist.website");
    }
}
