use api_contract::{AuthorizationDto, PermissionDto, SignaturesDto, UserPermissionsDto};
use serde_json::{Value, json};
use std::collections::BTreeMap;

#[test]
fn user_permissions_keyed_by_device_name() {
    let mut permissions = BTreeMap::new();
    permissions.insert(
        "Oven1".to_string(),
        vec![PermissionDto {
            name: "StartProcess".to_string(),
            signatures: SignaturesDto {
                signature: true,
                authorization: false,
                note: true,
            },
        }],
    );
    let dto = UserPermissionsDto {
        user_id: "alice".to_string(),
        display_name: "Alice".to_string(),
        permissions,
    };

    let value = serde_json::to_value(dto).expect("serialize");
    assert_eq!(value.get("userId"), Some(&Value::from("alice")));
    assert!(value.get("user_id").is_none());
    assert_eq!(
        value["permissions"],
        json!({
            "Oven1": [
                { "name": "StartProcess", "signatures": { "signature": true, "authorization": false, "note": true } }
            ]
        })
    );
}

#[test]
fn authorization_is_camel_case() {
    let dto = AuthorizationDto {
        user_id: "alice".to_string(),
        device: "Oven1".to_string(),
        permission: "StartProcess".to_string(),
        signatures: SignaturesDto {
            signature: false,
            authorization: false,
            note: false,
        },
    };
    let value = serde_json::to_value(dto).expect("serialize");
    assert!(value.get("userId").is_some());
    assert_eq!(value["signatures"]["note"], Value::from(false));
}
