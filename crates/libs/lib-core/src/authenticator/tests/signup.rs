use super::*;

#[tokio::test]
async fn test_signup_then_authenticate() {
    // Arrange
    let auth = memory_auth();

    // Act
    let token = signup_jsmith(&auth).await;
    let user = auth.authenticate(&token).await.expect("token should authenticate");

    // Assert
    assert_eq!(user.username, "jsmith");
    assert_eq!(user.full_name, "John Smith");
    assert_eq!(token.len(), 64);
}

#[tokio::test]
async fn test_signup_stores_salted_hash() {
    let auth = memory_auth();
    signup_jsmith(&auth).await;

    let record = auth
        .store()
        .get_user_by_username("jsmith")
        .await
        .expect("user should be stored");

    assert_eq!(record.password_salt.len(), lib_auth::SALT_BYTES);
    assert_eq!(record.password_hash.len(), 32);
    assert_ne!(record.password_hash, b"supersecretpassword".to_vec());
    assert!(!record.is_disabled);
}

#[tokio::test]
async fn test_same_password_gets_different_hashes() {
    let auth = memory_auth();
    auth.signup("A", "alice", "hunter2").await.expect("signup should succeed");
    auth.signup("B", "bob", "hunter2").await.expect("signup should succeed");

    let alice = auth.store().get_user_by_username("alice").await.expect("alice");
    let bob = auth.store().get_user_by_username("bob").await.expect("bob");

    assert_ne!(alice.password_salt, bob.password_salt);
    assert_ne!(alice.password_hash, bob.password_hash);
}

#[tokio::test]
async fn test_duplicate_signup_keeps_original() {
    // Arrange
    let auth = memory_auth();
    let first_token = signup_jsmith(&auth).await;

    // Act
    let result = auth.signup("Impostor", "jsmith", "otherpassword").await;

    // Assert
    assert!(matches!(result, Err(AuthError::DuplicateUsername(ref name)) if name == "jsmith"));

    let user = auth
        .authenticate(&first_token)
        .await
        .expect("original session should still work");
    assert_eq!(user.full_name, "John Smith");

    auth.signin("jsmith", "supersecretpassword")
        .await
        .expect("original password should still work");
    assert!(matches!(
        auth.signin("jsmith", "otherpassword").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_signup_rejects_empty_username() {
    let auth = memory_auth();

    let result = auth.signup("Nobody", "", "password").await;

    assert!(matches!(result, Err(AuthError::InvalidInput(_))));
    assert_eq!(auth.store().session_count().await, 0);
}

#[tokio::test]
async fn test_signup_accepts_empty_password_and_full_name() {
    let auth = memory_auth();

    let token = auth.signup("", "quiet", "").await.expect("signup should succeed");
    let user = auth.authenticate(&token).await.expect("token should authenticate");

    assert_eq!(user.full_name, "");
    auth.signin("quiet", "").await.expect("empty password should sign in");
}

#[tokio::test]
async fn test_concurrent_signups_with_same_username() {
    let auth = std::sync::Arc::new(memory_auth());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let auth = auth.clone();
            tokio::spawn(async move { auth.signup(&format!("Racer {i}"), "racer", "pw").await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(_) => successes += 1,
            Err(AuthError::DuplicateUsername(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
}

#[tokio::test]
async fn test_signup_sqlite() {
    let auth = sqlite_auth().await;

    let token = signup_jsmith(&auth).await;
    let user = auth.authenticate(&token).await.expect("token should authenticate");
    assert_eq!(user.username, "jsmith");

    assert!(matches!(
        auth.signup("Impostor", "jsmith", "x").await,
        Err(AuthError::DuplicateUsername(_))
    ));
}
