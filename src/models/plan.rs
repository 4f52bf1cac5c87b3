use serde::{Deserialize, Serialize};

/// A membership plan offered by the gym. Server-owned; identity is the
/// server-assigned id and the client never mutates it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub duration_months: i64,
}

/// Wire wrapper: the backend returns `{"plans": [...]}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct PlansResponse {
    #[serde(default)]
    pub plans: Vec<Plan>,
}
