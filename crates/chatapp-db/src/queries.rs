use crate::Database;
use crate::models::{MessageRow, UserRow};
use anyhow::Result;
use chatapp_types::models::MessageTarget;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(&self, user_name: &str, password: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (user_name, password) VALUES (?1, ?2)",
                (user_name, password),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_name(&self, user_name: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_name(conn, user_name))
    }

    pub fn user_exists(&self, user_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                [user_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        sender_id: i64,
        target: MessageTarget,
        content: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (sender_id, receiver_id, group_id, content)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![sender_id, target.receiver_id(), target.group_id(), content],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Everything visible to `user_id`: direct messages addressed to them,
    /// then messages in every group they belong to. The two result sets are
    /// concatenated, each in insertion order; they are not merge-sorted by
    /// timestamp.
    pub fn get_messages(&self, user_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut messages = query_direct_messages(conn, user_id)?;
            messages.extend(query_group_messages(conn, user_id)?);
            Ok(messages)
        })
    }

    // -- Groups --

    /// Inserts the group and its creator's membership in one transaction, so
    /// a failed membership insert cannot leave a memberless group behind.
    pub fn create_group(&self, group_name: &str, creator_id: i64) -> Result<i64> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO groups (group_name, creator_id) VALUES (?1, ?2)",
                (group_name, creator_id),
            )?;
            let group_id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO group_members (user_id, group_id) VALUES (?1, ?2)",
                (creator_id, group_id),
            )?;
            tx.commit()?;
            Ok(group_id)
        })
    }

    pub fn group_exists(&self, group_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM groups WHERE id = ?1)",
                [group_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    /// No duplicate check: joining twice inserts a second membership row.
    pub fn add_group_member(&self, user_id: i64, group_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO group_members (user_id, group_id) VALUES (?1, ?2)",
                (user_id, group_id),
            )?;
            Ok(())
        })
    }

    pub fn group_member_count(&self, group_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM group_members WHERE group_id = ?1",
                [group_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }
}

fn query_user_by_name(conn: &Connection, user_name: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, user_name, password FROM users WHERE user_name = ?1")?;

    let row = stmt
        .query_row([user_name], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                user_name: row.get(1)?,
                password: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_direct_messages(conn: &Connection, user_id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, sender_id, receiver_id, group_id, content, sent_at
         FROM messages
         WHERE receiver_id = ?1 AND group_id IS NULL
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map([user_id], scan_message)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_group_messages(conn: &Connection, user_id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.sender_id, m.receiver_id, m.group_id, m.content, m.sent_at
         FROM messages m
         JOIN group_members gm ON m.group_id = gm.group_id
         WHERE gm.user_id = ?1
         ORDER BY m.id",
    )?;

    let rows = stmt
        .query_map([user_id], scan_message)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn scan_message(row: &rusqlite::Row<'_>) -> std::result::Result<MessageRow, rusqlite::Error> {
    Ok(MessageRow {
        id: row.get(0)?,
        sender_id: row.get(1)?,
        receiver_id: row.get(2)?,
        group_id: row.get(3)?,
        content: row.get(4)?,
        sent_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn create_user_then_lookup() {
        let db = db();
        let id = db.create_user("alice", "pw1").unwrap();

        let user = db.get_user_by_name("alice").unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.password, "pw1");
        assert!(db.user_exists(id).unwrap());
        assert!(!db.user_exists(id + 1).unwrap());
    }

    #[test]
    fn duplicate_user_name_rejected_and_original_untouched() {
        let db = db();
        db.create_user("alice", "pw1").unwrap();
        assert!(db.create_user("alice", "pw2").is_err());

        let user = db.get_user_by_name("alice").unwrap().unwrap();
        assert_eq!(user.password, "pw1");
    }

    #[test]
    fn unknown_user_lookup_is_none() {
        let db = db();
        assert!(db.get_user_by_name("nobody").unwrap().is_none());
    }

    #[test]
    fn direct_message_lands_in_receivers_inbox() {
        let db = db();
        let alice = db.create_user("alice", "pw").unwrap();
        let bob = db.create_user("bob", "pw").unwrap();

        db.insert_message(alice, MessageTarget::Direct { receiver_id: bob }, "hello bob")
            .unwrap();

        let inbox = db.get_messages(bob).unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].sender_id, alice);
        assert_eq!(inbox[0].receiver_id, Some(bob));
        assert_eq!(inbox[0].group_id, None);
        assert_eq!(inbox[0].content, "hello bob");
        assert!(!inbox[0].sent_at.is_empty());

        // Sender has no group memberships and received nothing
        assert!(db.get_messages(alice).unwrap().is_empty());
    }

    #[test]
    fn get_messages_is_idempotent() {
        let db = db();
        let alice = db.create_user("alice", "pw").unwrap();
        let bob = db.create_user("bob", "pw").unwrap();
        db.insert_message(alice, MessageTarget::Direct { receiver_id: bob }, "one")
            .unwrap();
        db.insert_message(alice, MessageTarget::Direct { receiver_id: bob }, "two")
            .unwrap();

        let first: Vec<_> = db
            .get_messages(bob)
            .unwrap()
            .into_iter()
            .map(|m| (m.id, m.content))
            .collect();
        let second: Vec<_> = db
            .get_messages(bob)
            .unwrap()
            .into_iter()
            .map(|m| (m.id, m.content))
            .collect();
        assert_eq!(first, second);
        assert_eq!(first[0].1, "one");
        assert_eq!(first[1].1, "two");
    }

    #[test]
    fn creator_is_member_immediately_after_create_group() {
        let db = db();
        let alice = db.create_user("alice", "pw").unwrap();

        let group_id = db.create_group("team", alice).unwrap();
        assert!(db.group_exists(group_id).unwrap());
        assert_eq!(db.group_member_count(group_id).unwrap(), 1);
    }

    #[test]
    fn group_messages_visible_to_all_members() {
        let db = db();
        let alice = db.create_user("alice", "pw").unwrap();
        let bob = db.create_user("bob", "pw").unwrap();

        let group_id = db.create_group("team", alice).unwrap();
        db.add_group_member(bob, group_id).unwrap();
        db.insert_message(bob, MessageTarget::Group { group_id }, "hi")
            .unwrap();

        // Visible to creator, the joined member, and no one else
        for member in [alice, bob] {
            let msgs = db.get_messages(member).unwrap();
            assert_eq!(msgs.len(), 1, "member {member} should see the group message");
            assert_eq!(msgs[0].group_id, Some(group_id));
            assert_eq!(msgs[0].receiver_id, None);
            assert_eq!(msgs[0].content, "hi");
        }
        let carol = db.create_user("carol", "pw").unwrap();
        assert!(db.get_messages(carol).unwrap().is_empty());
    }

    #[test]
    fn direct_then_group_concatenation_order() {
        let db = db();
        let alice = db.create_user("alice", "pw").unwrap();
        let bob = db.create_user("bob", "pw").unwrap();
        let group_id = db.create_group("team", bob).unwrap();

        // Group message inserted before the direct one; concatenation still
        // lists direct messages first.
        db.insert_message(alice, MessageTarget::Group { group_id }, "group first")
            .unwrap();
        db.insert_message(alice, MessageTarget::Direct { receiver_id: bob }, "direct second")
            .unwrap();

        let msgs = db.get_messages(bob).unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].content, "direct second");
        assert_eq!(msgs[1].content, "group first");
    }

    #[test]
    fn duplicate_membership_not_deduplicated() {
        let db = db();
        let alice = db.create_user("alice", "pw").unwrap();
        let bob = db.create_user("bob", "pw").unwrap();
        let group_id = db.create_group("team", alice).unwrap();

        db.add_group_member(bob, group_id).unwrap();
        db.add_group_member(bob, group_id).unwrap();
        assert_eq!(db.group_member_count(group_id).unwrap(), 3);
    }
}
