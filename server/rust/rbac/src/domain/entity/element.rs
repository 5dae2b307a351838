use serde::{Deserialize, Serialize};

/// Element はメニュー配下のボタンなどの画面要素を表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub id: i64,
    #[serde(default)]
    pub menu_id: Option<i64>,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub href: String,
}
