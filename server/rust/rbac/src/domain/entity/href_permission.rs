use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::menu::Menu;

/// HrefPermission は (code, href) の組で表される画面権限。
/// メニューとボタン要素のどちらから得られたかは区別しない。
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
pub struct HrefPermission {
    pub code: String,
    pub href: String,
}

/// HrefPermissionSet は値の等価性で重複排除された href 権限の集合。
pub type HrefPermissionSet = BTreeSet<HrefPermission>;

impl HrefPermission {
    pub fn new(code: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            href: href.into(),
        }
    }
}

impl From<&Menu> for HrefPermission {
    fn from(menu: &Menu) -> Self {
        Self::new(menu.code.clone(), menu.href.clone())
    }
}

impl From<&Element> for HrefPermission {
    fn from(element: &Element) -> Self {
        Self::new(element.code.clone(), element.href.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_by_value() {
        let mut set = HrefPermissionSet::new();
        set.insert(HrefPermission::new("user:list", "/users"));
        set.insert(HrefPermission::new("user:list", "/users"));
        set.insert(HrefPermission::new("user:list", "/users/list"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_menu_and_element() {
        let menu = Menu {
            id: 1,
            parent_id: None,
            code: "system".to_string(),
            name: "System".to_string(),
            href: "/system".to_string(),
            sort: 0,
        };
        let element = Element {
            id: 10,
            menu_id: Some(1),
            code: "system:save".to_string(),
            name: "Save".to_string(),
            href: "/system/save".to_string(),
        };
        assert_eq!(HrefPermission::from(&menu), HrefPermission::new("system", "/system"));
        assert_eq!(
            HrefPermission::from(&element),
            HrefPermission::new("system:save", "/system/save")
        );
    }
}
