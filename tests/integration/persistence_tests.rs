//! Persistence through the file backend

#[cfg(test)]
mod tests {
    use crate::common::HotelFixture;
    use crate::common::fixtures::RW;
    use hotel_privileges::storage::LocalFileStore;
    use hotel_privileges::{PrivilegeError, PrivilegeFlag, PrivilegeStore, ResourceKind};
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn file_fixture(dir: &TempDir) -> HotelFixture {
        let store = LocalFileStore::new(dir.path()).await.unwrap();
        HotelFixture::with_store(Arc::new(store))
    }

    #[tokio::test]
    async fn test_state_survives_new_store() {
        let temp_dir = TempDir::new().unwrap();
        file_fixture(&temp_dir).await.seed().await;

        // A second process over the same directory
        let fixture = file_fixture(&temp_dir).await;
        let system = fixture.service.load_system().await.unwrap();

        assert!(system.is_entitled("H1", "rooms"));
        assert_eq!(system.get_grant("H1", "Manager", "rooms"), RW);
    }

    #[tokio::test]
    async fn test_wire_format_is_nested_by_hotel() {
        let temp_dir = TempDir::new().unwrap();
        let fixture = file_fixture(&temp_dir).await;
        fixture.seed().await;

        let stored = fixture
            .service
            .store()
            .load(ResourceKind::RoleGrants)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            stored.data["H1"]["Manager"]["rooms"],
            json!({ "read": true, "write": true, "maintain": false })
        );

        let entitlements = fixture
            .service
            .store()
            .load(ResourceKind::Entitlements)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entitlements.data, json!({ "H1": ["invoicing", "rooms"] }));
    }

    #[tokio::test]
    async fn test_concurrent_sessions_conflict_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let fixture = file_fixture(&temp_dir).await;
        fixture.seed().await;

        let mut first = fixture.service.edit_grants().await.unwrap();
        let mut second = fixture.service.edit_grants().await.unwrap();

        first
            .draft_mut()
            .toggle_grant("H1", "Clerk", "rooms", PrivilegeFlag::Write)
            .unwrap();
        first.save().await.unwrap();

        second
            .draft_mut()
            .toggle_grant("H1", "Manager", "rooms", PrivilegeFlag::Maintain)
            .unwrap();
        let err = second.save().await.unwrap_err();
        assert!(matches!(err, PrivilegeError::Conflict(_)));
        assert!(!second.committed().get_grant("H1", "Manager", "rooms").maintain);
    }

    #[tokio::test]
    async fn test_resources_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let fixture = file_fixture(&temp_dir).await;
        fixture.seed().await;

        let mut overrides = fixture.service.edit_overrides().await.unwrap();
        overrides
            .draft_mut()
            .toggle_override("H1", "Clerk", "u1", "invoicing", PrivilegeFlag::Read)
            .unwrap();
        assert_eq!(overrides.save().await.unwrap(), 1);

        // Saving overrides does not bump the grant version
        let grants = fixture.service.edit_grants().await.unwrap();
        assert_eq!(grants.version(), 1);
    }
}
