use serde::{Deserialize, Serialize};

/// A row in the backend's status table (e.g. "active").
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MembershipStatus {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One membership of the signed-in user. Dates come back as
/// "YYYY-MM-DD" or ISO-8601 strings depending on the backend path.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Membership {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub plan_id: Option<i64>,
    #[serde(default)]
    pub status_id: Option<i64>,
    #[serde(default)]
    pub status: Option<MembershipStatus>,
    #[serde(default)]
    pub starts_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Wire wrapper for endpoints that return one membership alongside a
/// message, such as the 201 body of `POST subscribe`.
#[derive(Serialize, Deserialize, Debug)]
pub struct MembershipEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub membership: Membership,
}

/// Wire wrapper for `GET membership/current`: a null membership is a valid
/// "no membership" answer, not an error.
#[derive(Serialize, Deserialize, Debug)]
pub struct CurrentMembershipResponse {
    #[serde(default)]
    pub membership: Option<Membership>,
}

/// The dashboard snapshot: status text, a QR payload for entry, and the
/// nested membership (absent when the user has none). Never cached; callers
/// re-fetch after any mutating operation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub qr: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub membership: Option<Membership>,
}

impl DashboardResponse {
    /// Display status, falling back to the nested membership's status name
    /// and then to "no membership" when nothing is there.
    pub fn status_label(&self) -> String {
        if let Some(status) = &self.status {
            return status.clone();
        }
        self.membership
            .as_ref()
            .and_then(|m| m.status.as_ref())
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "no membership".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A dashboard payload with `"membership": null` is a valid
    /// "no membership" snapshot.
    #[test]
    fn test_dashboard_without_membership() {
        let raw = r#"{"status": null, "qr": null, "membership": null}"#;
        let dash: DashboardResponse =
            serde_json::from_str(raw).expect("null membership should parse");
        assert!(dash.membership.is_none());
        assert_eq!(dash.status_label(), "no membership");
    }

    /// The nested membership parses with its status row and date strings.
    #[test]
    fn test_dashboard_with_nested_membership() {
        let raw = r#"{
            "status": "active",
            "qr": "aGVsbG8=",
            "membership": {
                "id": 7,
                "user_id": 3,
                "plan_id": 2,
                "status_id": 1,
                "status": {"id": 1, "name": "active", "description": "Currently active"},
                "starts_at": "2026-01-01",
                "expires_at": "2026-07-01"
            }
        }"#;
        let dash: DashboardResponse = serde_json::from_str(raw).expect("payload should parse");
        assert_eq!(dash.status_label(), "active");
        let membership = dash.membership.as_ref().expect("membership expected");
        assert_eq!(membership.id, 7);
        assert_eq!(membership.starts_at.as_deref(), Some("2026-01-01"));
    }
}
