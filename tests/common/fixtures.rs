//! Test fixtures and data factories
//!
//! Builds the sample console used throughout the integration tests. All fixtures create real
//! objects, not mocks.

use std::sync::Arc;

use hotel_privileges::storage::MemoryStore;
use hotel_privileges::{
    Catalog, MenuNode, PagePrivilege, PrivilegeService, PrivilegeStore, Role, RoleDirectory,
    User,
};

pub const RW: PagePrivilege = PagePrivilege {
    read: true,
    write: true,
    maintain: false,
};

pub const R: PagePrivilege = PagePrivilege {
    read: true,
    write: false,
    maintain: false,
};

/// Console menu with two modules
pub fn menu() -> Vec<MenuNode> {
    vec![
        MenuNode::module(
            "operations",
            "Operations",
            vec![
                MenuNode::leaf("rooms", "Rooms"),
                MenuNode::leaf("events", "Events"),
                MenuNode::module(
                    "housekeeping",
                    "Housekeeping",
                    vec![MenuNode::leaf("linen", "Linen")],
                ),
            ],
        ),
        MenuNode::module(
            "finance",
            "Finance",
            vec![
                MenuNode::leaf("invoicing", "Invoicing"),
                MenuNode::leaf("payroll", "Payroll"),
            ],
        ),
    ]
}

pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_menu(&menu()).expect("sample menu has unique ids"))
}

/// Hotel H1 with Manager and Clerk roles and a user holding both
pub struct HotelFixture {
    pub service: PrivilegeService,
    pub directory: RoleDirectory,
    pub user: User,
}

impl HotelFixture {
    /// Empty stores over memory
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn PrivilegeStore>) -> Self {
        let mut directory = RoleDirectory::new();
        directory
            .add_role(Role::with_id("r-manager", "H1", "Manager"))
            .expect("fresh directory");
        directory
            .add_role(Role::with_id("r-clerk", "H1", "Clerk"))
            .expect("fresh directory");
        directory
            .add_role(Role::with_id("r-h2-manager", "H2", "Manager"))
            .expect("fresh directory");

        let user = User::new("u1", "H1")
            .with_role("r-manager")
            .with_role("r-clerk");

        Self {
            service: PrivilegeService::new(store, catalog()),
            directory,
            user,
        }
    }

    /// Save the H1 entitlements and the Manager/Clerk grants
    pub async fn seed(&self) {
        let mut entitlements = self.service.edit_entitlements().await.unwrap();
        entitlements.draft_mut().set_entitled("H1", "rooms", true).unwrap();
        entitlements
            .draft_mut()
            .set_entitled("H1", "invoicing", true)
            .unwrap();
        entitlements.save().await.unwrap();

        let mut grants = self.service.edit_grants().await.unwrap();
        let draft = grants.draft_mut();
        draft.set_grant("H1", "Manager", "rooms", RW).unwrap();
        draft.set_grant("H1", "Clerk", "rooms", R).unwrap();
        draft.set_grant("H1", "Clerk", "invoicing", RW).unwrap();
        grants.save().await.unwrap();
    }
}

impl Default for HotelFixture {
    fn default() -> Self {
        Self::new()
    }
}
