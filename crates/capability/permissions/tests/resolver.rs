use domain::{Permission, PermissionSet, SignatureRequirements};
use secadmin_permissions::PermissionResolver;
use secadmin_storage::{DirectoryBuilder, InMemoryDirectoryStore};
use std::sync::Arc;

fn resolver(store: InMemoryDirectoryStore) -> PermissionResolver {
    PermissionResolver::new(Arc::new(store))
}

/// 两个区域各有一台名为 Mixer 的设备，签名策略不同。
fn shared_name_directory(first_role: &str, second_role: &str) -> InMemoryDirectoryStore {
    let mut builder = InMemoryDirectoryStore::builder();
    builder
        .user("bob", "bob", "Bob")
        .role("day", "DayShift")
        .role("night", "NightShift")
        .assign_role("bob", first_role)
        .assign_role("bob", second_role)
        .zone("z1", "Line1")
        .zone("z2", "Line2")
        .link_zone("day", "z1")
        .link_zone("night", "z2")
        .device_type("mixer", "MixerController", true)
        .device("mixer-a", "z1", "mixer", "Mixer")
        .device("mixer-b", "z2", "mixer", "Mixer")
        .permission_definition("blend", "mixer", "Blend")
        .grant("z1", "mixer", "day", "blend", true)
        .grant("z2", "mixer", "night", "blend", true)
        .signature_policy("z1", "mixer", "blend", true, false, false)
        .signature_policy("z2", "mixer", "blend", false, true, true);
    builder.build()
}

fn single_zone_builder() -> DirectoryBuilder {
    let mut builder = InMemoryDirectoryStore::builder();
    builder
        .user("carol", "carol", "Carol")
        .role("op", "Operator")
        .assign_role("carol", "op")
        .zone("z1", "Line1")
        .link_zone("op", "z1")
        .device_type("oven", "OvenController", true)
        .device("oven-1", "z1", "oven", "Oven1");
    builder
}

#[tokio::test]
async fn operator_scenario() {
    let resolved = resolver(InMemoryDirectoryStore::with_demo_directory())
        .resolve("alice")
        .await
        .expect("resolve")
        .expect("alice");

    let mut expected = PermissionSet::new();
    expected.insert_first(
        "Oven1",
        Permission::new("StartProcess", SignatureRequirements::new(true, false, true)),
    );
    assert_eq!(resolved.permissions, expected);
    assert_eq!(resolved.user_id, "alice");
    assert_eq!(resolved.display_name, "Alice Operator");
}

#[tokio::test]
async fn non_application_devices_are_excluded() {
    let resolved = resolver(InMemoryDirectoryStore::with_demo_directory())
        .resolve("alice")
        .await
        .expect("resolve")
        .expect("alice");
    assert!(resolved.permissions.permissions_for("Panel1").is_none());
    assert!(!resolved.permissions.device_names().any(|name| name == "Panel1"));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let result = resolver(InMemoryDirectoryStore::with_demo_directory())
        .resolve("mallory")
        .await
        .expect("resolve");
    assert!(result.is_none());
}

#[tokio::test]
async fn user_without_roles_gets_empty_set() {
    let mut builder = InMemoryDirectoryStore::builder();
    builder.user("dave", "dave", "");
    let resolved = resolver(builder.build())
        .resolve("dave")
        .await
        .expect("resolve")
        .expect("dave");
    assert!(resolved.permissions.is_empty());
    assert_eq!(resolved.display_name, "dave");
}

#[tokio::test]
async fn role_without_zones_contributes_nothing() {
    let mut builder = InMemoryDirectoryStore::builder();
    builder
        .user("erin", "erin", "Erin")
        .role("idle", "Idle")
        .assign_role("erin", "idle")
        .device_type("oven", "OvenController", true)
        .zone("z1", "Line1")
        .device("oven-1", "z1", "oven", "Oven1")
        .permission_definition("start", "oven", "Start")
        .grant("z1", "oven", "idle", "start", true);
    let resolved = resolver(builder.build())
        .resolve("erin")
        .await
        .expect("resolve")
        .expect("erin");
    assert!(resolved.permissions.is_empty());
}

#[tokio::test]
async fn resolution_is_repeatable() {
    let resolver = resolver(shared_name_directory("day", "night"));
    let first = resolver.resolve("bob").await.expect("first").expect("bob");
    let second = resolver.resolve("bob").await.expect("second").expect("bob");
    assert_eq!(first, second);
}

#[tokio::test]
async fn first_traversed_path_decides_signature_policy() {
    let day_first = resolver(shared_name_directory("day", "night"))
        .resolve("bob")
        .await
        .expect("resolve")
        .expect("bob");
    let permissions = day_first.permissions.permissions_for("Mixer").expect("mixer");
    assert_eq!(permissions.len(), 1);
    assert_eq!(permissions[0].name, "Blend");
    assert_eq!(
        permissions[0].signatures,
        SignatureRequirements::new(true, false, false)
    );

    let night_first = resolver(shared_name_directory("night", "day"))
        .resolve("bob")
        .await
        .expect("resolve")
        .expect("bob");
    let permissions = night_first.permissions.permissions_for("Mixer").expect("mixer");
    assert_eq!(permissions.len(), 1);
    assert_eq!(
        permissions[0].signatures,
        SignatureRequirements::new(false, true, true)
    );
}

#[tokio::test]
async fn same_permission_through_two_roles_appears_once() {
    let mut builder = single_zone_builder();
    builder
        .role("lead", "Lead")
        .assign_role("carol", "lead")
        .link_zone("lead", "z1")
        .permission_definition("start", "oven", "Start")
        .grant("z1", "oven", "op", "start", true)
        .grant("z1", "oven", "lead", "start", true);
    let resolved = resolver(builder.build())
        .resolve("carol")
        .await
        .expect("resolve")
        .expect("carol");
    assert_eq!(resolved.permissions.permission_count(), 1);
}

#[tokio::test]
async fn missing_signature_policy_defaults_to_no_controls() {
    let mut builder = single_zone_builder();
    builder
        .permission_definition("start", "oven", "Start")
        .grant("z1", "oven", "op", "start", true);
    let resolved = resolver(builder.build())
        .resolve("carol")
        .await
        .expect("resolve")
        .expect("carol");
    let permission = resolved.permissions.get("Oven1", "Start").expect("start");
    assert_eq!(permission.signatures, SignatureRequirements::default());
}

#[tokio::test]
async fn grant_order_is_preserved_within_device() {
    let mut builder = single_zone_builder();
    builder
        .permission_definition("stop", "oven", "Stop")
        .permission_definition("start", "oven", "Start")
        .permission_definition("purge", "oven", "Purge")
        .grant("z1", "oven", "op", "purge", true)
        .grant("z1", "oven", "op", "start", true)
        .grant("z1", "oven", "op", "stop", true);
    let resolved = resolver(builder.build())
        .resolve("carol")
        .await
        .expect("resolve")
        .expect("carol");
    let names: Vec<_> = resolved
        .permissions
        .permissions_for("Oven1")
        .expect("oven")
        .iter()
        .map(|permission| permission.name.as_str())
        .collect();
    assert_eq!(names, vec!["Purge", "Start", "Stop"]);
}

#[tokio::test]
async fn false_and_orphaned_grants_are_ignored() {
    let mut builder = single_zone_builder();
    builder
        .permission_definition("start", "oven", "Start")
        .grant("z1", "oven", "op", "start", false)
        .grant("z1", "oven", "op", "deleted-permission", true)
        .grant("z9", "oven", "op", "start", true)
        .grant("z1", "ghost-type", "op", "start", true);
    let resolved = resolver(builder.build())
        .resolve("carol")
        .await
        .expect("resolve")
        .expect("carol");
    assert!(resolved.permissions.is_empty());
}

#[tokio::test]
async fn every_device_of_the_granted_type_receives_the_grant() {
    let mut builder = single_zone_builder();
    builder
        .device("oven-2", "z1", "oven", "Oven2")
        .permission_definition("start", "oven", "Start")
        .grant("z1", "oven", "op", "start", true);
    let resolved = resolver(builder.build())
        .resolve("carol")
        .await
        .expect("resolve")
        .expect("carol");
    assert!(resolved.permissions.contains("Oven1", "Start"));
    assert!(resolved.permissions.contains("Oven2", "Start"));
}
