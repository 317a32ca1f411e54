//! Resolution scenarios across entitlements, grants and overrides

#[cfg(test)]
mod tests {
    use crate::common::HotelFixture;
    use crate::common::fixtures::{R, RW};
    use hotel_privileges::{GrantScope, OverrideSelection, PagePrivilege, PrivilegeFlag};

    #[tokio::test]
    async fn test_manager_and_clerk_merged_view() {
        let fixture = HotelFixture::new();
        fixture.seed().await;

        let system = fixture.service.load_system().await.unwrap();
        let view = system.merged_role_view("H1", &fixture.user, &fixture.directory);

        assert_eq!(view.len(), 2);
        assert_eq!(view["rooms"], RW);
        assert_eq!(view["invoicing"], RW);
    }

    #[tokio::test]
    async fn test_override_replaces_role_grant() {
        let fixture = HotelFixture::new();
        fixture.seed().await;

        let mut overrides = fixture.service.edit_overrides().await.unwrap();
        overrides
            .draft_mut()
            .set_override("H1", "Clerk", "u1", "invoicing", R)
            .unwrap();
        overrides.save().await.unwrap();

        let system = fixture.service.load_system().await.unwrap();
        assert_eq!(
            system
                .effective_privilege("H1", "Clerk", "u1", "invoicing")
                .unwrap(),
            R
        );
        // Another user under the same role still gets the grant
        assert_eq!(
            system
                .effective_privilege("H1", "Clerk", "u2", "invoicing")
                .unwrap(),
            RW
        );
    }

    #[tokio::test]
    async fn test_soft_revocation_round_trip() {
        let fixture = HotelFixture::new();
        fixture.seed().await;
        let before = fixture.service.load_system().await.unwrap();

        let mut entitlements = fixture.service.edit_entitlements().await.unwrap();
        entitlements
            .draft_mut()
            .set_entitled("H1", "rooms", false)
            .unwrap();
        entitlements.save().await.unwrap();

        let revoked = fixture.service.load_system().await.unwrap();
        assert_eq!(
            revoked
                .effective_privilege("H1", "Manager", "u1", "rooms")
                .unwrap(),
            PagePrivilege::NONE
        );
        assert_eq!(revoked.grants(), before.grants());

        entitlements
            .draft_mut()
            .set_entitled("H1", "rooms", true)
            .unwrap();
        entitlements.save().await.unwrap();

        let restored = fixture.service.load_system().await.unwrap();
        assert_eq!(restored.grants(), before.grants());
        assert_eq!(
            restored
                .effective_privilege("H1", "Manager", "u1", "rooms")
                .unwrap(),
            RW
        );
    }

    #[tokio::test]
    async fn test_check_reports_granting_roles() {
        let fixture = HotelFixture::new();
        fixture.seed().await;
        let system = fixture.service.load_system().await.unwrap();

        let write_rooms = system
            .check("H1", &fixture.user, &fixture.directory, "rooms", PrivilegeFlag::Write)
            .unwrap();
        assert!(write_rooms.granted);
        assert_eq!(write_rooms.granted_by_roles, vec!["Manager".to_string()]);

        let read_rooms = system
            .check("H1", &fixture.user, &fixture.directory, "rooms", PrivilegeFlag::Read)
            .unwrap();
        assert_eq!(
            read_rooms.granted_by_roles,
            vec!["Clerk".to_string(), "Manager".to_string()]
        );

        let maintain = system
            .check("H1", &fixture.user, &fixture.directory, "rooms", PrivilegeFlag::Maintain)
            .unwrap();
        assert!(!maintain.granted);
        assert!(maintain.denial_reason.is_some());
    }

    #[tokio::test]
    async fn test_other_hotel_sees_nothing() {
        let fixture = HotelFixture::new();
        fixture.seed().await;
        let system = fixture.service.load_system().await.unwrap();

        assert!(system
            .merged_role_view("H2", &fixture.user, &fixture.directory)
            .is_empty());
        assert_eq!(
            system.effective_privilege("H2", "Manager", "u1", "rooms").unwrap(),
            PagePrivilege::NONE
        );
    }

    #[tokio::test]
    async fn test_editing_matrices_follow_catalog_order() {
        let fixture = HotelFixture::new();
        fixture.seed().await;
        let system = fixture.service.load_system().await.unwrap();

        let scope = GrantScope::new("H1", "Clerk").unwrap();
        let rows: Vec<(&str, PagePrivilege)> = system
            .grant_matrix(&scope)
            .unwrap()
            .into_iter()
            .map(|(page, privilege)| (page.id.as_str(), privilege))
            .collect();
        assert_eq!(rows, vec![("rooms", R), ("invoicing", RW)]);

        let incomplete = OverrideSelection::new().with_hotel("H1").with_role("Clerk");
        assert!(incomplete.scope().is_err());

        let scope = incomplete.with_user("u1").scope().unwrap();
        let rows = system.override_matrix(&scope).unwrap();
        assert!(rows.iter().all(|(_, _, overridden)| !overridden));
    }
}
