use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// RoleStatus はロールの有効状態を表す。永続化時は "0" / "1" のコードで保存する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum RoleStatus {
    #[serde(rename = "0")]
    Disabled,
    #[default]
    #[serde(rename = "1")]
    Enabled,
}

impl RoleStatus {
    pub fn as_code(self) -> &'static str {
        match self {
            RoleStatus::Disabled => "0",
            RoleStatus::Enabled => "1",
        }
    }

    /// from_code は永続化コードを RoleStatus に変換する。未知のコードは Disabled とみなす。
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => RoleStatus::Enabled,
            _ => RoleStatus::Disabled,
        }
    }
}

/// Role はユーザーに割り当てられ、メニューやボタン要素の権限を束ねるロールを表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct Role {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: RoleStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    pub deleted: bool,
}

/// UserRole はユーザーとロールの多対多の関連を表す。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRole {
    pub user_id: i64,
    pub role_id: i64,
}
