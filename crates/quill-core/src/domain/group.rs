use std::fmt;

use serde::{Deserialize, Serialize};

/// Group entity - a named topic posts can be filed under.
///
/// The slug is globally unique and addressable; deleting a group never
/// deletes its posts, they merely lose the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Data for a group row that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_title_verbatim() {
        let group = Group {
            id: 1,
            title: "Тестовая группа".to_string(),
            slug: "test-slug".to_string(),
            description: "Тестовое описание".to_string(),
        };
        assert_eq!(group.to_string(), group.title);
    }
}
