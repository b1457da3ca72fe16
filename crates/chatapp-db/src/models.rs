/// Database row types — these map directly to SQLite rows.
/// Distinct from chatapp-types API models to keep the DB layer independent;
/// timestamps stay as the raw SQLite text until the API boundary.

pub struct UserRow {
    pub id: i64,
    pub user_name: String,
    pub password: String,
}

pub struct MessageRow {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: Option<i64>,
    pub group_id: Option<i64>,
    pub content: String,
    pub sent_at: String,
}
