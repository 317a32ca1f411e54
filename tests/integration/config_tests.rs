//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use hotel_privileges::config::StorageBackend;
    use hotel_privileges::{Config, PrivilegeError, PrivilegeService};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_example_config_parses() {
        let config = Config::from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/privileges.example.yaml"
        ))
        .await
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.optimistic_locking);
        assert!(config.catalog.menu_path.is_some());
    }

    #[tokio::test]
    async fn test_service_from_example_menu() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = format!(
            "storage:\n  backend: file\n  path: {}\ncatalog:\n  menu_path: {}/config/menu.example.yaml\n",
            temp_dir.path().display(),
            env!("CARGO_MANIFEST_DIR")
        );
        let config = Config::from_yaml(&yaml).unwrap();

        let service = PrivilegeService::from_config(&config).await.unwrap();
        let catalog = service.catalog();
        assert!(!catalog.is_empty());
        assert!(catalog.pages().iter().all(|page| page.depth == 0 || page.parent_id.is_some()));
    }

    #[tokio::test]
    async fn test_missing_menu_is_config_error() {
        let config =
            Config::from_yaml("catalog:\n  menu_path: /nonexistent/menu.yaml\n").unwrap();

        let result = PrivilegeService::from_config(&config).await;
        assert!(matches!(result, Err(PrivilegeError::Config(_))));
    }

    #[cfg(not(feature = "redis"))]
    #[tokio::test]
    async fn test_redis_backend_requires_feature() {
        let config = Config::from_yaml("storage:\n  backend: redis\n").unwrap();

        let result = PrivilegeService::from_config(&config).await;
        assert!(matches!(result, Err(PrivilegeError::Config(_))));
    }
}
