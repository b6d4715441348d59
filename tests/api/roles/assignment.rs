use test_context::test_context;

use crate::helpers::{
    add_new_project, add_role, find_role, get_json_response_body, get_str, TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_invite_then_confirm_same_candidate(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;
    let candidate_id = candidate.id.to_string();

    let response = app.post_assign(&owner, &role_id, &candidate_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(get_str(&body, "status"), "invitation_pending");
    assert_eq!(get_str(&body, "assignedProfileId"), candidate_id);

    let notifications = app.sent_notifications().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["recipientId"], candidate_id);
    assert_eq!(notifications[0]["event"]["type"], "role_invitation");
    assert_eq!(notifications[0]["event"]["roleId"], role_id);

    let response = app.post_assign(&owner, &role_id, &candidate_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(get_str(&body, "status"), "assigned");

    // Confirmation sends nothing new
    assert_eq!(app.sent_notifications().await.len(), 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_assigning_other_candidate(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let first = app.add_user("Dougal McGuire", "son").await;
    let second = app.add_user("Jack Hackett", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    assert_eq!(
        app.post_assign(&owner, &role_id, &first.id.to_string())
            .await
            .status()
            .as_u16(),
        200
    );
    assert_eq!(
        app.post_assign(&owner, &role_id, &second.id.to_string())
            .await
            .status()
            .as_u16(),
        409
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_assigning_draft_role(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", false).await;

    let response = app
        .post_assign(&owner, &role_id, &candidate.id.to_string())
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_or_404_for_bad_candidate(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    let response = app.post_assign(&owner, &role_id, "not-a-uuid").await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post_assign(&owner, &role_id, &uuid::Uuid::new_v4().to_string())
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_let_confirmed_category_admin_manage_category(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let admin = app.add_user("Mrs Doyle", "son").await;
    let candidate = app.add_user("Dougal McGuire", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;

    let response = app
        .post_role(
            &owner,
            &serde_json::json!({
                "projectId": project_id,
                "category": "son",
                "title": "Chef opérateur son",
                "isCategoryAdmin": true,
                "publish": true
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let admin_role_id = get_str(&get_json_response_body(response).await, "id").to_owned();
    let sound_role = add_role(app, &owner, &project_id, "son", "Perchman", true).await;
    let image_role = add_role(app, &owner, &project_id, "image", "Cadreur", true).await;

    let admin_id = admin.id.to_string();
    app.post_assign(&owner, &admin_role_id, &admin_id).await;

    // Pending invitation grants nothing yet
    assert_eq!(
        app.post_assign(&admin, &sound_role, &candidate.id.to_string())
            .await
            .status()
            .as_u16(),
        403
    );

    assert_eq!(
        app.post_invitation(&admin, &admin_role_id, true)
            .await
            .status()
            .as_u16(),
        200
    );

    assert_eq!(
        app.post_assign(&admin, &sound_role, &candidate.id.to_string())
            .await
            .status()
            .as_u16(),
        200
    );
    assert_eq!(
        app.post_assign(&admin, &image_role, &candidate.id.to_string())
            .await
            .status()
            .as_u16(),
        403
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_accept_or_decline_invitation(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let accepted_role = add_role(app, &owner, &project_id, "son", "Perchman", true).await;
    let declined_role = add_role(app, &owner, &project_id, "son", "Ingénieur son", true).await;
    let candidate_id = candidate.id.to_string();

    app.post_assign(&owner, &accepted_role, &candidate_id).await;
    app.post_assign(&owner, &declined_role, &candidate_id).await;

    // Only the invitee answers
    assert_eq!(
        app.post_invitation(&owner, &accepted_role, true)
            .await
            .status()
            .as_u16(),
        403
    );

    let response = app.post_invitation(&candidate, &accepted_role, true).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(get_str(&body, "status"), "assigned");

    let response = app.post_invitation(&candidate, &declined_role, false).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(get_str(&body, "status"), "published");
    assert!(body["assignedProfileId"].is_null());

    let answers: Vec<_> = app
        .sent_notifications()
        .await
        .into_iter()
        .filter(|n| n["event"]["type"] == "invitation_answered")
        .collect();
    assert_eq!(answers.len(), 2);
    assert!(answers.iter().all(|n| n["recipientId"] == owner.id.to_string()));
    assert_eq!(answers[0]["event"]["accepted"], true);
    assert_eq!(answers[1]["event"]["accepted"], false);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_remove_assignment_and_allow_reapplying(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "son").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    let application_id = crate::helpers::apply(app, &candidate, &role_id).await;
    assert_eq!(
        app.post_accept(&owner, &application_id).await.status().as_u16(),
        200
    );

    let response = app.post_remove_assignment(&owner, &role_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let role = find_role(app, &owner, &project_id, &role_id).await;
    assert_eq!(role["status"], "published");
    assert!(role["assignedProfileId"].is_null());

    // The accepted application is gone, so a fresh one can be filed
    let response = app.post_apply(&candidate, &role_id, Some("Encore moi")).await;
    assert_eq!(response.status().as_u16(), 201);

    // Nothing left to remove
    assert_eq!(
        app.post_remove_assignment(&owner, &role_id)
            .await
            .status()
            .as_u16(),
        409
    );
}
