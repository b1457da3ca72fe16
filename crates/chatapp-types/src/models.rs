use serde::{Deserialize, Serialize};

/// Where a message is going. Exactly one of the wire's `receiver_id` /
/// `group_id` fields is meaningful per message; this variant makes that
/// explicit instead of threading two nullable columns through the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTarget {
    Direct { receiver_id: i64 },
    Group { group_id: i64 },
}

impl MessageTarget {
    /// Build a target from the optional wire fields. A present `group_id`
    /// wins over `receiver_id` (matching how clients already send both);
    /// neither present means the request is malformed.
    pub fn from_parts(receiver_id: Option<i64>, group_id: Option<i64>) -> Option<Self> {
        match (receiver_id, group_id) {
            (_, Some(group_id)) => Some(Self::Group { group_id }),
            (Some(receiver_id), None) => Some(Self::Direct { receiver_id }),
            (None, None) => None,
        }
    }

    pub fn receiver_id(&self) -> Option<i64> {
        match self {
            Self::Direct { receiver_id } => Some(*receiver_id),
            Self::Group { .. } => None,
        }
    }

    pub fn group_id(&self) -> Option<i64> {
        match self {
            Self::Direct { .. } => None,
            Self::Group { group_id } => Some(*group_id),
        }
    }
}
