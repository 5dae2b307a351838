use std::collections::BTreeSet;

use crate::domain::entity::element::Element;
use crate::domain::entity::href_permission::{HrefPermission, HrefPermissionSet};
use crate::domain::entity::menu::Menu;
use crate::domain::entity::role::UserRole;
use crate::domain::entity::role_link::RoleLink;

/// LinkTargets はロール関連から抽出した、重複のないメニュー ID とボタン要素 ID。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTargets {
    pub menu_ids: Vec<i64>,
    pub element_ids: Vec<i64>,
}

impl LinkTargets {
    pub fn is_empty(&self) -> bool {
        self.menu_ids.is_empty() && self.element_ids.is_empty()
    }
}

/// HrefPermissionDomainService は href 権限集合を組み立てるドメインロジックを提供する。
pub struct HrefPermissionDomainService;

impl HrefPermissionDomainService {
    /// ユーザーロール関連から重複のないロール ID を昇順で返す。
    pub fn role_ids(user_roles: &[UserRole]) -> Vec<i64> {
        user_roles
            .iter()
            .map(|ur| ur.role_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// ロール関連が参照するメニュー ID とボタン要素 ID を集める。
    /// 参照を持たない側は無視する。
    pub fn collect_targets(links: &[RoleLink]) -> LinkTargets {
        let mut menu_ids = BTreeSet::new();
        let mut element_ids = BTreeSet::new();
        for link in links {
            if let Some(id) = link.menu_id {
                menu_ids.insert(id);
            }
            if let Some(id) = link.element_id {
                element_ids.insert(id);
            }
        }
        LinkTargets {
            menu_ids: menu_ids.into_iter().collect(),
            element_ids: element_ids.into_iter().collect(),
        }
    }

    /// メニューとボタン要素の (code, href) の和集合を返す。
    pub fn merge(menus: &[Menu], elements: &[Element]) -> HrefPermissionSet {
        menus
            .iter()
            .map(HrefPermission::from)
            .chain(elements.iter().map(HrefPermission::from))
            .collect()
    }

    /// 権限集合に href が完全一致する要素があるかを判定する。空の href は常に不一致。
    pub fn grants_href(permissions: &HrefPermissionSet, href: &str) -> bool {
        !href.is_empty() && permissions.iter().any(|p| p.href == href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(role_id: i64, menu_id: Option<i64>, element_id: Option<i64>) -> RoleLink {
        RoleLink {
            role_id,
            menu_id,
            element_id,
        }
    }

    fn menu(id: i64, code: &str, href: &str) -> Menu {
        Menu {
            id,
            parent_id: None,
            code: code.to_string(),
            name: code.to_string(),
            href: href.to_string(),
            sort: 0,
        }
    }

    fn element(id: i64, code: &str, href: &str) -> Element {
        Element {
            id,
            menu_id: None,
            code: code.to_string(),
            name: code.to_string(),
            href: href.to_string(),
        }
    }

    #[test]
    fn test_role_ids_are_distinct_and_sorted() {
        let user_roles = vec![
            UserRole { user_id: 1, role_id: 3 },
            UserRole { user_id: 1, role_id: 1 },
            UserRole { user_id: 1, role_id: 3 },
        ];
        assert_eq!(HrefPermissionDomainService::role_ids(&user_roles), vec![1, 3]);
    }

    #[test]
    fn test_collect_targets_skips_absent_references() {
        let links = vec![
            link(1, Some(10), None),
            link(1, None, Some(100)),
            link(2, Some(10), Some(101)),
            link(2, None, None),
        ];
        let targets = HrefPermissionDomainService::collect_targets(&links);
        assert_eq!(targets.menu_ids, vec![10]);
        assert_eq!(targets.element_ids, vec![100, 101]);
    }

    #[test]
    fn test_collect_targets_without_references_is_empty() {
        let targets = HrefPermissionDomainService::collect_targets(&[link(1, None, None)]);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_merge_unions_menus_and_elements() {
        let menus = vec![menu(1, "system", "/system"), menu(2, "log", "/log")];
        let elements = vec![element(10, "system", "/system"), element(11, "save", "")];
        let set = HrefPermissionDomainService::merge(&menus, &elements);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&HrefPermission::new("save", "")));
    }

    #[test]
    fn test_grants_href_requires_exact_match() {
        let set = HrefPermissionDomainService::merge(
            &[menu(1, "system", "/system")],
            &[element(10, "blank", "")],
        );
        assert!(HrefPermissionDomainService::grants_href(&set, "/system"));
        assert!(!HrefPermissionDomainService::grants_href(&set, "/system/"));
        assert!(!HrefPermissionDomainService::grants_href(&set, ""));
    }
}
