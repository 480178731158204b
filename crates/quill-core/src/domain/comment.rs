use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Post, User};

/// Comment entity - a reply to a post.
///
/// Lives and dies with its post and with its author (cascade on both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Data for a comment row that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub author_id: i64,
    pub text: String,
}

impl Comment {
    /// Display label, composed from the author's and post's own labels.
    ///
    /// The comment row only carries ids, so the resolved entities are
    /// passed in by the caller.
    pub fn label(&self, author: &User, post: &Post) -> String {
        format!("Comment by {} on {}", author, post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_composes_author_and_post_labels() {
        let author = User {
            id: 1,
            username: "lev".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let post = Post {
            id: 1,
            author_id: 1,
            group_id: None,
            text: "Тестовый пост".to_string(),
            image: None,
            pub_date: Utc::now(),
        };
        let comment = Comment {
            id: 1,
            post_id: 1,
            author_id: 1,
            text: "Коммент".to_string(),
            created: Utc::now(),
        };
        assert_eq!(comment.label(&author, &post), "Comment by lev on Тестовый пост");
    }
}
