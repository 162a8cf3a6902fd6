//! Role-dependent navigation menus. The four lists are fixed; the
//! navbar template renders whichever matches the visitor.

use serde::Serialize;

use crate::shared::types::{Role, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn item(href: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem { href, label, icon }
}

const ADMIN_MENU: &[MenuItem] = &[
    item("/home", "Home", "home"),
    item("/admin", "Admin Dashboard", "admin"),
    item("/businesses", "Businesses", "list"),
];

const VENDOR_MENU: &[MenuItem] = &[
    item("/home", "Home", "home"),
    item("/business-owner-dashboard", "Dashboard", "dashboard"),
    item("/my-businesses", "My Business", "my-business"),
    item("/businesses/new", "Add Business", "add"),
    item("/wishlist", "Favorites", "heart"),
    item("/businesses", "Browse", "list"),
];

const CUSTOMER_MENU: &[MenuItem] = &[
    item("/home", "Home", "home"),
    item("/wishlist", "Favorites", "heart"),
    item("/businesses/new", "Add Business", "add"),
    item("/businesses", "Browse", "list"),
];

const GUEST_MENU: &[MenuItem] = &[
    item("/home", "Home", "home"),
    item("/businesses", "Browse", "list"),
];

/// The menu list for the visitor. Guests additionally see the login
/// and signup actions, rendered separately by the navbar template.
pub fn menu_for(user: Option<&User>) -> &'static [MenuItem] {
    match user.map(|u| u.role) {
        Some(Role::Admin) => ADMIN_MENU,
        Some(Role::Vendor) => VENDOR_MENU,
        Some(Role::Customer) => CUSTOMER_MENU,
        None => GUEST_MENU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::User;

    fn user_with_role(role: Role) -> User {
        User {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            name: "U One".to_string(),
            role,
            image: None,
            email_verified: None,
            created_at: None,
        }
    }

    #[test]
    fn test_guest_menu_has_no_authenticated_links() {
        let menu = menu_for(None);
        assert!(!menu.iter().any(|m| m.href == "/wishlist"));
        assert!(!menu.iter().any(|m| m.href == "/admin"));
    }

    #[test]
    fn test_admin_menu_includes_dashboard() {
        let menu = menu_for(Some(&user_with_role(Role::Admin)));
        assert!(menu.iter().any(|m| m.href == "/admin"));
    }

    #[test]
    fn test_vendor_menu_includes_owner_pages() {
        let menu = menu_for(Some(&user_with_role(Role::Vendor)));
        assert!(menu.iter().any(|m| m.href == "/business-owner-dashboard"));
        assert!(menu.iter().any(|m| m.href == "/my-businesses"));
    }

    #[test]
    fn test_customer_menu_lacks_admin_and_owner_pages() {
        let menu = menu_for(Some(&user_with_role(Role::Customer)));
        assert!(!menu.iter().any(|m| m.href == "/admin"));
        assert!(!menu.iter().any(|m| m.href == "/business-owner-dashboard"));
        assert!(menu.iter().any(|m| m.href == "/wishlist"));
    }
}
