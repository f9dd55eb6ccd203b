use secadmin_storage::{DirectoryStore, InMemoryDirectoryStore};

#[tokio::test]
async fn find_demo_user() {
    let store = InMemoryDirectoryStore::with_demo_directory();
    let user = store
        .find_user("alice")
        .await
        .expect("query")
        .expect("alice");
    assert_eq!(user.display_name, "Alice Operator");

    let missing = store.find_user("mallory").await.expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn roles_and_zones_follow_insertion_order() {
    let mut builder = InMemoryDirectoryStore::builder();
    builder
        .user("u1", "u1", "User 1")
        .role("r2", "Second")
        .role("r1", "First")
        .assign_role("u1", "r2")
        .assign_role("u1", "r1")
        .assign_role("u1", "r1")
        .zone("z1", "Zone 1")
        .zone("z2", "Zone 2")
        .link_zone("r1", "z2")
        .link_zone("r1", "z1");
    let store = builder.build();

    let roles = store.list_user_roles("u1").await.expect("roles");
    let role_ids: Vec<_> = roles.iter().map(|role| role.role_id.as_str()).collect();
    assert_eq!(role_ids, vec!["r2", "r1"]);

    let zones = store.list_role_zones("r1").await.expect("zones");
    let zone_ids: Vec<_> = zones.iter().map(|zone| zone.zone_id.as_str()).collect();
    assert_eq!(zone_ids, vec!["z2", "z1"]);
}

#[tokio::test]
async fn dangling_links_are_skipped() {
    let mut builder = InMemoryDirectoryStore::builder();
    builder
        .user("u1", "u1", "User 1")
        .assign_role("u1", "ghost-role")
        .role("r1", "Role")
        .link_zone("r1", "ghost-zone");
    let store = builder.build();

    assert!(store.list_user_roles("u1").await.expect("roles").is_empty());
    assert!(store.list_role_zones("r1").await.expect("zones").is_empty());
}

#[tokio::test]
async fn only_application_devices_are_listed() {
    let store = InMemoryDirectoryStore::with_demo_directory();
    let devices = store.list_application_devices("line1").await.expect("devices");
    let names: Vec<_> = devices.iter().map(|device| device.name.as_str()).collect();
    assert_eq!(names, vec!["Oven1"]);
}

#[tokio::test]
async fn grants_require_true_value_and_matching_definition() {
    let mut builder = InMemoryDirectoryStore::builder();
    builder
        .device_type("dt1", "Controller", true)
        .device_type("dt2", "Other", true)
        .permission_definition("p1", "dt1", "Start")
        .permission_definition("p2", "dt1", "Stop")
        .permission_definition("p3", "dt2", "Foreign")
        .grant("z1", "dt1", "r1", "p1", true)
        .grant("z1", "dt1", "r1", "p2", false)
        .grant("z1", "dt1", "r1", "p3", true)
        .grant("z1", "dt1", "r1", "missing", true);
    let store = builder.build();

    let grants = store
        .list_permission_grants("z1", "dt1", "r1")
        .await
        .expect("grants");
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].permission_name, "Start");
    assert!(grants[0].granted);
}

#[tokio::test]
async fn grant_overwrite_keeps_single_row() {
    let mut builder = InMemoryDirectoryStore::builder();
    builder
        .device_type("dt1", "Controller", true)
        .permission_definition("p1", "dt1", "Start")
        .grant("z1", "dt1", "r1", "p1", false)
        .grant("z1", "dt1", "r1", "p1", true);
    let store = builder.build();

    let grants = store
        .list_permission_grants("z1", "dt1", "r1")
        .await
        .expect("grants");
    assert_eq!(grants.len(), 1);
}

#[tokio::test]
async fn signature_policy_lookup() {
    let store = InMemoryDirectoryStore::with_demo_directory();
    let policy = store
        .find_signature_policy("line1", "oven-controller", "start-process")
        .await
        .expect("query")
        .expect("policy");
    let requirements = policy.requirements();
    assert!(requirements.signature);
    assert!(!requirements.authorization);
    assert!(requirements.note);

    let missing = store
        .find_signature_policy("line2", "oven-controller", "start-process")
        .await
        .expect("query");
    assert!(missing.is_none());
}
