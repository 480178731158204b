use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many characters of the text make up a post's display label.
pub const POST_LABEL_CHARS: usize = 15;

/// Post entity - a unit of content.
///
/// `pub_date` is assigned once at creation and never changes. The group
/// reference is optional and nulled out when the group is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub text: String,
    /// Path under the media root, as returned by the asset store.
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
}

/// Data for a post row that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub text: String,
    pub image: Option<String>,
}

impl Post {
    /// Display label: the first [`POST_LABEL_CHARS`] characters of the text.
    ///
    /// Character count, not bytes, so multibyte text is never split.
    pub fn label(&self) -> String {
        self.text.chars().take(POST_LABEL_CHARS).collect()
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(text: &str) -> Post {
        Post {
            id: 1,
            author_id: 1,
            group_id: None,
            text: text.to_string(),
            image: None,
            pub_date: Utc::now(),
        }
    }

    #[test]
    fn label_is_whole_text_when_short() {
        // 13 characters, well over 15 bytes in UTF-8
        let p = post("Тестовый пост");
        assert_eq!(p.to_string(), "Тестовый пост");
    }

    #[test]
    fn label_truncates_to_fifteen_characters() {
        let p = post("a very long post about nothing in particular");
        assert_eq!(p.to_string(), "a very long pos");
        assert_eq!(p.label().chars().count(), 15);
    }

    #[test]
    fn label_counts_characters_not_bytes() {
        let p = post("Очень длинный текст поста");
        assert_eq!(p.to_string(), "Очень длинный т");
    }
}
