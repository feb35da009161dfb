use serde::{Deserialize, Serialize};

/// Body of `POST /api/invite/create`
///
/// Every field is optional so that a missing or mistyped value reaches the
/// service as a missing id instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub user_id: Option<String>,
}

/// Body of `POST /api/invite/accept`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInviteRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub invite_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteResponse {
    pub invite_id: String,
}

/// Public view of an unredeemed invite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteSummary {
    pub invite_id: String,
    pub inviter_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInviteResponse {
    pub success: bool,
    pub relationship_id: String,
}

/// Query form used by the function binding: `GET /api/invite?inviteId=...`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteQuery {
    pub invite_id: Option<String>,
}

/// Accept only JSON strings; anything else (numbers, objects, null) counts as absent.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}
