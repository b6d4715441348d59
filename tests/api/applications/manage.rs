use test_context::test_context;

use crate::helpers::{
    add_new_project, add_role, apply, find_role, get_json_response_body, get_str,
    TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_without_touching_role(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "acteur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "acteur", "Rôle Principal", true).await;
    let application_id = apply(app, &candidate, &role_id).await;

    let response = app.post_reject(&owner, &application_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(get_str(&body, "status"), "rejected");

    let role = find_role(app, &owner, &project_id, &role_id).await;
    assert_eq!(role["status"], "published");
    assert!(role["assignedProfileId"].is_null());

    let notifications = app.sent_notifications().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["recipientId"], candidate.id.to_string());
    assert_eq!(notifications[0]["event"]["type"], "application_rejected");

    assert_eq!(
        app.post_reject(&owner, &application_id).await.status().as_u16(),
        409
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_applications_with_profiles(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "acteur").await;
    let stranger = app.add_user("Father Dick Byrne", "realisateur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "acteur", "Rôle Principal", true).await;
    let application_id = apply(app, &candidate, &role_id).await;

    let response = app.get_role_applications(&owner, &role_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    let applications = body["applications"].as_array().expect("No applications");
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["id"], application_id);
    assert_eq!(applications[0]["candidate"]["fullName"], "Dougal McGuire");

    let response = app.get_role_applications(&stranger, &role_id).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_withdraw_own_pending_application(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "acteur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "acteur", "Rôle Principal", true).await;
    let application_id = apply(app, &candidate, &role_id).await;

    assert_eq!(
        app.delete_application(&owner, &application_id)
            .await
            .status()
            .as_u16(),
        403
    );

    let response = app.delete_application(&candidate, &application_id).await;
    assert_eq!(response.status().as_u16(), 204);

    let body = get_json_response_body(app.get_my_applications(&candidate).await).await;
    assert_eq!(body["applications"], serde_json::json!([]));

    assert_eq!(
        app.delete_application(&candidate, &application_id)
            .await
            .status()
            .as_u16(),
        404
    );
}
