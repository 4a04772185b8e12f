use serde::{Deserialize, Serialize};

/// Public profile of a user, as served by the user endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Read-only view of the authenticated identity, constructed once by the
/// authentication boundary and cloned into every engine. Nothing in this
/// crate family mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    viewer: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { viewer: None }
    }

    pub fn signed_in(viewer: UserProfile) -> Self {
        Self {
            viewer: Some(viewer),
        }
    }

    pub fn viewer(&self) -> Option<&UserProfile> {
        self.viewer.as_ref()
    }

    pub fn viewer_id(&self) -> Option<&str> {
        self.viewer.as_ref().map(|viewer| viewer.id.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.viewer.is_some()
    }

    /// Whether edit/delete affordances should be shown for a comment by
    /// `author_id`. Display rule only; the store re-checks every mutation.
    pub fn can_modify(&self, author_id: &str) -> bool {
        self.viewer
            .as_ref()
            .is_some_and(|viewer| viewer.id == author_id || viewer.is_admin)
    }
}
