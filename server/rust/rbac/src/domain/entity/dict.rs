use serde::{Deserialize, Serialize};

/// DictLst はデータ辞書の選択肢 1 件を表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct DictLst {
    pub id: i64,
    pub dict_id: i64,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sort: i32,
}
