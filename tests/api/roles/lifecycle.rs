use test_context::test_context;

use crate::helpers::{
    add_new_project, add_role, find_role, get_json_response_body, get_str, TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_publish_and_unpublish(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "deco", "Accessoiriste", false).await;

    let response = app.post_publish(&owner, &role_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(get_str(&body, "status"), "published");

    // Already published
    assert_eq!(app.post_publish(&owner, &role_id).await.status().as_u16(), 409);

    let response = app.post_unpublish(&owner, &role_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(get_str(&body, "status"), "draft");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_unpublishing_assigned_role(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    let response = app
        .post_assign(&owner, &role_id, &candidate.id.to_string())
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_unpublish(&owner, &role_id).await;
    assert_eq!(response.status().as_u16(), 409);

    let role = find_role(app, &owner, &project_id, &role_id).await;
    assert_eq!(role["status"], "invitation_pending");
    assert_eq!(role["assignedProfileId"], candidate.id.to_string());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_if_not_owner(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let stranger = app.add_user("Father Dick Byrne", "realisateur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", false).await;

    assert_eq!(app.post_publish(&stranger, &role_id).await.status().as_u16(), 403);
    assert_eq!(app.delete_role(&stranger, &role_id).await.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_delete_role_and_its_applications(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;
    crate::helpers::apply(app, &candidate, &role_id).await;

    let response = app.delete_role(&owner, &role_id).await;
    assert_eq!(response.status().as_u16(), 204);

    let body = get_json_response_body(app.get_roles(&owner, &project_id).await).await;
    assert_eq!(body["sections"], serde_json::json!([]));

    let body = get_json_response_body(app.get_my_applications(&candidate).await).await;
    assert_eq!(body["applications"], serde_json::json!([]));

    assert_eq!(app.delete_role(&owner, &role_id).await.status().as_u16(), 404);
}
