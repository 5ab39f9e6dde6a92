//! End-to-end auth flows over the in-memory session store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use gatehub_auth::{AuthSystem, MemorySessionStore, RoleRegistry, SessionStore, TokenManager};
use gatehub_core::config::rbac::{RbacConfig, RoleConfig};
use gatehub_core::config::AppConfig;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Memory-store system seeded with a small role hierarchy:
/// admin -> editor -> viewer.
fn system() -> AuthSystem {
    let mut config = AppConfig::default();
    config.auth.token_secret = "integration-test-secret".to_string();
    config.rbac = RbacConfig {
        enabled: true,
        roles: HashMap::from([
            (
                "viewer".to_string(),
                RoleConfig {
                    permissions: strings(&["posts:read:any"]),
                    inherits: vec![],
                    description: None,
                },
            ),
            (
                "editor".to_string(),
                RoleConfig {
                    permissions: strings(&["posts:edit:own"]),
                    inherits: strings(&["viewer"]),
                    description: None,
                },
            ),
            (
                "admin".to_string(),
                RoleConfig {
                    permissions: strings(&["*"]),
                    inherits: strings(&["editor"]),
                    description: Some("Full access".to_string()),
                },
            ),
        ]),
    };
    AuthSystem::from_config(&config, None).unwrap()
}

#[tokio::test]
async fn create_then_validate_round_trips() {
    let auth = system();
    let token = auth.create_session(42, ["editor"]).await.unwrap();

    let session = auth.validate_session(&token).await.unwrap().unwrap();
    assert_eq!(session.user_id, 42);
    assert!(session.roles.contains("editor"));
    assert!(session.expires_at > session.created_at);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let auth = system();
    let token = auth.create_session(42, ["editor"]).await.unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    tampered.push(if token.ends_with('x') { 'y' } else { 'x' });

    assert!(auth.validate_session(&tampered).await.unwrap().is_none());
    assert!(auth.validate_session("garbage").await.unwrap().is_none());
}

#[tokio::test]
async fn expired_session_is_absent_even_with_a_live_token() {
    let config = AppConfig::default();
    let store = Arc::new(MemorySessionStore::new(&config.session.memory));
    let auth = AuthSystem::new(
        TokenManager::new(&config.auth),
        store.clone(),
        Arc::new(RoleRegistry::new()),
        config.auth.token_id_length,
    );

    let token = auth.create_session(42, ["member"]).await.unwrap();
    let mut session = auth.validate_session(&token).await.unwrap().unwrap();

    // Force the stored record past its expiry; the token itself still
    // verifies for another day.
    session.expires_at = Utc::now() - chrono::Duration::seconds(1);
    store.set(&session).await.unwrap();

    assert!(auth.validate_session(&token).await.unwrap().is_none());
}

#[tokio::test]
async fn invalidate_closes_the_session() {
    let auth = system();
    let token = auth.create_session(42, ["editor"]).await.unwrap();

    auth.invalidate_session(&token).await.unwrap();
    assert!(auth.validate_session(&token).await.unwrap().is_none());

    // Repeated invalidation and junk tokens are silent no-ops.
    auth.invalidate_session(&token).await.unwrap();
    auth.invalidate_session("garbage").await.unwrap();
}

#[tokio::test]
async fn permission_checks_respect_scope_and_ownership() {
    let auth = system();
    let token = auth.create_session(42, ["editor"]).await.unwrap();

    // Inherited any-scope grant, ownership irrelevant.
    assert!(auth.has_permission(&token, "posts:read:any", None).await.unwrap());
    assert!(auth.has_permission(&token, "posts:read:any", Some(7)).await.unwrap());

    // Own-scope grant only passes for the session's own user.
    assert!(auth.has_permission(&token, "posts:edit:own", Some(42)).await.unwrap());
    assert!(!auth.has_permission(&token, "posts:edit:own", Some(7)).await.unwrap());
    assert!(!auth.has_permission(&token, "posts:edit:own", None).await.unwrap());

    // Nothing grants deletion to an editor.
    assert!(!auth.has_permission(&token, "posts:delete:any", None).await.unwrap());
}

#[tokio::test]
async fn wildcard_role_passes_every_check() {
    let auth = system();
    let token = auth.create_session(1, ["admin"]).await.unwrap();

    assert!(auth.has_permission(&token, "posts:delete:any", None).await.unwrap());
    assert!(auth.has_permission(&token, "billing:export:own", Some(999)).await.unwrap());
}

#[tokio::test]
async fn unknown_token_denies_permission() {
    let auth = system();
    assert!(!auth.has_permission("garbage", "posts:read:any", None).await.unwrap());
}

#[tokio::test]
async fn assign_role_upgrades_a_live_session() {
    let auth = system();
    let token = auth.create_session(42, ["viewer"]).await.unwrap();
    assert!(!auth.has_permission(&token, "posts:edit:own", Some(42)).await.unwrap());

    assert!(auth.assign_role(&token, "editor").await.unwrap());
    assert!(auth.has_permission(&token, "posts:edit:own", Some(42)).await.unwrap());

    // Assigning again is still a success.
    assert!(auth.assign_role(&token, "editor").await.unwrap());
}

#[tokio::test]
async fn assign_rejects_undefined_role() {
    let auth = system();
    let token = auth.create_session(42, ["viewer"]).await.unwrap();
    assert!(!auth.assign_role(&token, "superuser").await.unwrap());
    assert!(!auth.assign_role("garbage", "editor").await.unwrap());
}

#[tokio::test]
async fn remove_role_downgrades_a_live_session() {
    let auth = system();
    let token = auth.create_session(42, ["editor"]).await.unwrap();

    assert!(auth.remove_role(&token, "editor").await.unwrap());
    assert!(!auth.has_permission(&token, "posts:edit:own", Some(42)).await.unwrap());

    // The role is already gone.
    assert!(!auth.remove_role(&token, "editor").await.unwrap());
}

#[tokio::test]
async fn session_roles_are_snapshots_of_names_not_grants() {
    let auth = system();
    let token = auth.create_session(42, ["editor"]).await.unwrap();

    // Redefining the role changes what the same session can do.
    auth.registry()
        .update_role("editor", &strings(&["posts:edit:any"]), &strings(&["viewer"]), None)
        .unwrap();
    assert!(auth.has_permission(&token, "posts:edit:any", None).await.unwrap());
    // The widened grant subsumes own-scoped requests for any owner.
    assert!(auth.has_permission(&token, "posts:edit:own", Some(7)).await.unwrap());
}

#[tokio::test]
async fn sessions_with_unregistered_roles_grant_nothing() {
    let auth = system();
    // Role names are not validated at session creation.
    let token = auth.create_session(42, ["made_up_role"]).await.unwrap();
    assert!(auth.validate_session(&token).await.unwrap().is_some());
    assert!(!auth.has_permission(&token, "posts:read:any", None).await.unwrap());
}
