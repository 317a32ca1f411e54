//! Tests for the privilege service

#[cfg(test)]
mod tests {
    use crate::auth::privilege::{
        EntitlementStore, PagePrivilege, PrivilegeFlag, RoleGrantStore, UserOverrideStore,
    };
    use crate::config::{Config, StorageBackend};
    use crate::core::catalog::{Catalog, MenuNode};
    use crate::services::privilege::{EditSession, PrivilegeService};
    use crate::storage::{MemoryStore, MockPrivilegeStore, PrivilegeStore, ResourceKind};
    use crate::utils::error::PrivilegeError;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn catalog() -> Arc<Catalog> {
        let menu = vec![MenuNode::module(
            "operations",
            "Operations",
            vec![
                MenuNode::leaf("rooms", "Rooms"),
                MenuNode::leaf("events", "Events"),
            ],
        )];
        Arc::new(Catalog::from_menu(&menu).unwrap())
    }

    fn memory_service() -> PrivilegeService {
        PrivilegeService::new(Arc::new(MemoryStore::new()), catalog())
    }

    #[tokio::test]
    async fn test_open_missing_resource_starts_empty() {
        let service = memory_service();
        let session = service.edit_grants().await.unwrap();

        assert_eq!(session.version(), 0);
        assert!(session.committed().is_empty());
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_save_commits_and_persists() {
        let service = memory_service();
        let mut session = service.edit_grants().await.unwrap();

        session
            .draft_mut()
            .toggle_grant("H1", "Manager", "rooms", PrivilegeFlag::Read)
            .unwrap();
        assert!(session.is_dirty());
        assert!(session.committed().is_empty());

        let version = session.save().await.unwrap();
        assert_eq!(version, 1);
        assert!(!session.is_dirty());
        assert!(session.committed().get_grant("H1", "Manager", "rooms").read);

        // A fresh session sees the saved state
        let reopened = service.edit_grants().await.unwrap();
        assert_eq!(reopened.version(), 1);
        assert_eq!(reopened.committed(), session.committed());
    }

    #[tokio::test]
    async fn test_clean_save_is_noop() {
        let mut store = MockPrivilegeStore::new();
        store.expect_load().returning(|_| Ok(None));
        store.expect_save().never();

        let mut session: EditSession<EntitlementStore> =
            EditSession::load(Arc::new(store), true).await.unwrap();
        assert_eq!(session.save().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_leaves_committed_state() {
        let mut store = MockPrivilegeStore::new();
        store.expect_load().returning(|_| Ok(None));
        store
            .expect_save()
            .times(1)
            .returning(|_, _, _| Err(PrivilegeError::persistence("backend unavailable")));

        let mut session: EditSession<EntitlementStore> =
            EditSession::load(Arc::new(store), true).await.unwrap();
        session
            .draft_mut()
            .set_entitled("H1", "rooms", true)
            .unwrap();

        let err = session.save().await.unwrap_err();
        assert!(err.is_persistence_failure());

        // Committed state is untouched and the edit is still pending
        assert!(!session.committed().is_entitled("H1", "rooms"));
        assert!(session.draft().is_entitled("H1", "rooms"));
        assert!(session.is_dirty());
        assert_eq!(session.version(), 0);
    }

    #[tokio::test]
    async fn test_save_sends_loaded_version() {
        let mut store = MockPrivilegeStore::new();
        store.expect_load().returning(|_| {
            Ok(Some(crate::storage::StoredResource {
                version: 7,
                updated_at: chrono::Utc::now(),
                data: json!({}),
            }))
        });
        store
            .expect_save()
            .withf(|kind, _, expected| {
                *kind == ResourceKind::UserOverrides && *expected == Some(7)
            })
            .times(1)
            .returning(|_, _, _| Ok(8));

        let mut session: EditSession<UserOverrideStore> =
            EditSession::load(Arc::new(store), true).await.unwrap();
        session
            .draft_mut()
            .toggle_override("H1", "Clerk", "u1", "rooms", PrivilegeFlag::Write)
            .unwrap();

        assert_eq!(session.save().await.unwrap(), 8);
        assert_eq!(session.version(), 8);
    }

    #[tokio::test]
    async fn test_save_without_locking_sends_no_version() {
        let mut store = MockPrivilegeStore::new();
        store.expect_load().returning(|_| Ok(None));
        store
            .expect_save()
            .withf(|_, _, expected| expected.is_none())
            .times(1)
            .returning(|_, _, _| Ok(1));

        let mut session: EditSession<RoleGrantStore> =
            EditSession::load(Arc::new(store), false).await.unwrap();
        session
            .draft_mut()
            .toggle_grant("H1", "Manager", "rooms", PrivilegeFlag::Maintain)
            .unwrap();
        assert_eq!(session.save().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_editors_conflict() {
        let service = memory_service();
        let mut first = service.edit_entitlements().await.unwrap();
        let mut second = service.edit_entitlements().await.unwrap();

        first.draft_mut().set_entitled("H1", "rooms", true).unwrap();
        first.save().await.unwrap();

        second.draft_mut().set_entitled("H1", "events", true).unwrap();
        let err = second.save().await.unwrap_err();
        assert!(matches!(err, PrivilegeError::Conflict(_)));

        // After reloading, the second editor can reapply and save
        second.reload().await.unwrap();
        assert!(second.committed().is_entitled("H1", "rooms"));
        second.draft_mut().set_entitled("H1", "events", true).unwrap();
        assert_eq!(second.save().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_last_write_wins_without_locking() {
        let service = memory_service().with_optimistic_locking(false);
        let mut first = service.edit_entitlements().await.unwrap();
        let mut second = service.edit_entitlements().await.unwrap();

        first.draft_mut().set_entitled("H1", "rooms", true).unwrap();
        first.save().await.unwrap();
        second.draft_mut().set_entitled("H1", "events", true).unwrap();
        second.save().await.unwrap();

        let system = service.load_system().await.unwrap();
        assert!(!system.is_entitled("H1", "rooms"));
        assert!(system.is_entitled("H1", "events"));
    }

    #[tokio::test]
    async fn test_discard_restores_committed() {
        let service = memory_service();
        let mut session = service.edit_grants().await.unwrap();
        session
            .draft_mut()
            .toggle_grant("H1", "Manager", "rooms", PrivilegeFlag::Read)
            .unwrap();

        session.discard();
        assert!(!session.is_dirty());
        assert_eq!(session.draft().get_grant("H1", "Manager", "rooms"), PagePrivilege::NONE);
    }

    #[tokio::test]
    async fn test_load_system_reads_all_resources() {
        let store = Arc::new(MemoryStore::new());
        store
            .save(ResourceKind::Entitlements, json!({ "H1": ["rooms"] }), None)
            .await
            .unwrap();
        store
            .save(
                ResourceKind::RoleGrants,
                json!({ "H1": { "Manager": { "rooms": { "read": true, "write": true } } } }),
                None,
            )
            .await
            .unwrap();

        let service = PrivilegeService::new(store, catalog());
        let system = service.load_system().await.unwrap();

        assert!(system.is_entitled("H1", "rooms"));
        let privilege = system
            .effective_privilege("H1", "Manager", "u1", "rooms")
            .unwrap();
        assert!(privilege.read && privilege.write && !privilege.maintain);
        assert!(system.overrides().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_document_fails_load() {
        let mut store = MockPrivilegeStore::new();
        store.expect_load().returning(|_| {
            Ok(Some(crate::storage::StoredResource {
                version: 1,
                updated_at: chrono::Utc::now(),
                data: json!({ "H1": "rooms" }),
            }))
        });

        let result = EditSession::<EntitlementStore>::load(Arc::new(store), true).await;
        assert!(matches!(result, Err(PrivilegeError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_from_config_with_file_backend() {
        let temp_dir = TempDir::new().unwrap();
        let menu_path = temp_dir.path().join("menu.yaml");
        std::fs::write(
            &menu_path,
            "- path: operations\n  label: Operations\n  children:\n    - path: rooms\n      label: Rooms\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.storage.backend = StorageBackend::File;
        config.storage.path = Some(temp_dir.path().join("data").display().to_string());
        config.catalog.menu_path = Some(menu_path.display().to_string());

        let service = PrivilegeService::from_config(&config).await.unwrap();
        assert_eq!(service.catalog().len(), 2);
        assert!(service.optimistic_locking());
        assert!(service.health_check().await.is_ok());

        let mut session = service.edit_entitlements().await.unwrap();
        session.draft_mut().set_entitled("H1", "rooms", true).unwrap();
        session.save().await.unwrap();
        assert!(temp_dir.path().join("data").join("entitlements.json").exists());
    }
}
