use secrecy::Secret;
use test_context::test_context;
use tita::{
    domain::{BannedTokenStore, BannedTokenStoreError},
    utils::constants::JWT_COOKIE_NAME,
};

use crate::helpers::TestApp;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_if_valid_jwt_cookie(app: &mut TestApp) {
    let user = app.add_user("Father Ted", "realisateur").await;
    app.set_session_cookie(&user);

    let token = Secret::new(user.token.clone());
    assert_eq!(
        app.banned_token_store
            .read()
            .await
            .check_token(&token)
            .await,
        Ok(())
    );

    let response = app.post_logout().await;
    assert_eq!(
        response.status().as_u16(),
        200,
        "Unexpected error logging out"
    );

    let auth_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == JWT_COOKIE_NAME)
        .expect("No auth cookie found");
    assert!(auth_cookie.value().is_empty());

    assert_eq!(
        app.banned_token_store
            .read()
            .await
            .check_token(&token)
            .await,
        Err(BannedTokenStoreError::BannedToken)
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_logout_called_twice_in_a_row(app: &mut TestApp) {
    let user = app.add_user("Father Ted", "realisateur").await;
    app.set_session_cookie(&user);

    assert_eq!(app.post_logout().await.status().as_u16(), 200);
    assert_eq!(app.post_logout().await.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_jwt_cookie_missing(app: &mut TestApp) {
    assert_eq!(app.post_logout().await.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_revoked_token_on_later_requests(app: &mut TestApp) {
    let user = app.add_user("Father Ted", "realisateur").await;
    app.set_session_cookie(&user);
    assert_eq!(app.post_logout().await.status().as_u16(), 200);

    // Bearer header still carries the revoked token
    let response = app.get_projects_list(&user).await;
    assert_eq!(response.status().as_u16(), 401);
}
