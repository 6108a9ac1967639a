//! Reply model for plaza.

/// Administrative answer to a post.
///
/// At most one live reply exists per post; the guarantee is operational
/// (upsert in [`super::ReplyRepository`]), not a schema constraint.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Row id.
    pub id: i64,
    /// Owning post.
    pub post_no: i64,
    /// Answer body.
    pub reply_content: String,
    /// Authoring admin.
    pub admin_id: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last edit timestamp.
    pub updated_at: String,
}

/// Whether an upsert created the reply or edited an existing one.
///
/// Only the first creation triggers the answer notification toward the
/// post's author; edits never re-notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// A new reply row was inserted.
    Created,
    /// An existing reply row was updated.
    Updated,
}

impl ReplyOutcome {
    /// True for the first creation of a post's reply.
    pub fn is_first(&self) -> bool {
        matches!(self, ReplyOutcome::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_first() {
        assert!(ReplyOutcome::Created.is_first());
        assert!(!ReplyOutcome::Updated.is_first());
    }
}
