#![allow(clippy::unwrap_used)]
// The file store keeps a session across independent store instances,
// the way it does across process restarts.

use std::collections::BTreeSet;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use storefront_api::CredentialStore;
use storefront_config::FileCredentialStore;
use storefront_core::{Access, RouteGuard};

#[test]
fn test_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.credentials.json");

    {
        let store = FileCredentialStore::new(&path);
        store
            .set_token(&SecretString::from("persisted".to_owned()))
            .unwrap();
        store
            .set_permissions(&BTreeSet::from(["orders.view".to_owned()]))
            .unwrap();
    }

    let reopened = FileCredentialStore::new(&path);
    assert_eq!(reopened.token().unwrap().expose_secret(), "persisted");
    assert!(reopened.permissions().contains("orders.view"));
}

#[test]
fn test_guard_reads_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCredentialStore::new(dir.path().join("c.json")));
    let guard = RouteGuard::new(store.clone());

    assert!(matches!(
        guard.authorize("/orders", None),
        Access::Redirect { .. }
    ));

    store
        .set_token(&SecretString::from("t".to_owned()))
        .unwrap();
    assert_eq!(guard.authorize("/orders", None), Access::Allow);
    assert!(!guard.authorize("/admin/brands", Some("brands.manage")).is_allowed());
}
