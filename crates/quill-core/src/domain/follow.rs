use serde::{Deserialize, Serialize};

/// Follow edge - a directed relationship in the social graph.
///
/// `user_id` follows `author_id`. At most one edge exists per pair, and
/// self-follow is rejected at the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follow {
    pub id: i64,
    pub user_id: i64,
    pub author_id: i64,
}
