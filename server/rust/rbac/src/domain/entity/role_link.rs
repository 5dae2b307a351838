use serde::{Deserialize, Serialize};

/// RoleLink はロールに付与されたメニュー / ボタン要素の組を表す。
/// menu_id と element_id はどちらも省略されうる。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleLink {
    pub role_id: i64,
    pub menu_id: Option<i64>,
    pub element_id: Option<i64>,
}
