use serde::{Deserialize, Serialize};

/// Menu は管理画面のメニュー項目を表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub sort: i32,
}
