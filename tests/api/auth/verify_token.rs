use test_context::test_context;

use crate::helpers::TestApp;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_valid_token(app: &mut TestApp) {
    let user = app.add_user("Dougal McGuire", "son").await;

    let response = app
        .post_verify_token(&serde_json::json!({ "token": user.token }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_invalid_token(app: &mut TestApp) {
    let response = app
        .post_verify_token(&serde_json::json!({ "token": "not-a-jwt" }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_banned_token(app: &mut TestApp) {
    let user = app.add_user("Dougal McGuire", "son").await;
    app.set_session_cookie(&user);
    assert_eq!(app.post_logout().await.status().as_u16(), 200);

    let response = app
        .post_verify_token(&serde_json::json!({ "token": user.token }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_input(app: &mut TestApp) {
    let response = app
        .post_verify_token(&serde_json::json!({ "jwt": "abc" }))
        .await;
    assert_eq!(response.status().as_u16(), 422);
}
