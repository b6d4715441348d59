use serde_json::json;
use test_context::test_context;

use crate::helpers::{
    add_new_project, add_role, get_json_response_body, get_str, TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_then_200_for_duplicate_application(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "acteur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "acteur", "Rôle Principal", true).await;

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "string", "minLength": 36, "maxLength": 36 },
        "roleId": { "type": "string", "minLength": 36, "maxLength": 36 },
        "candidateId": { "type": "string", "minLength": 36, "maxLength": 36 },
        "status": { "enum": ["pending", "accepted", "rejected"] },
        "message": { "type": ["string", "null"] },
        "createdAt": { "type": "string" }
      },
      "required": ["id", "roleId", "candidateId", "status", "createdAt"]
    });

    let response = app
        .post_apply(&candidate, &role_id, Some("Disponible tout l'été"))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let first = get_json_response_body(response).await;
    assert!(jsonschema::is_valid(&schema, &first));
    assert_eq!(get_str(&first, "status"), "pending");
    assert_eq!(get_str(&first, "message"), "Disponible tout l'été");

    let response = app.post_apply(&candidate, &role_id, Some("Encore moi")).await;
    assert_eq!(response.status().as_u16(), 200);
    let second = get_json_response_body(response).await;
    assert_eq!(second, first);

    let body = get_json_response_body(app.get_my_applications(&candidate).await).await;
    assert_eq!(body["applications"].as_array().expect("No applications").len(), 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_applying_to_own_role(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "acteur", "Rôle Principal", true).await;

    let response = app.post_apply(&owner, &role_id, None).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_role_not_open(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let candidate = app.add_user("Dougal McGuire", "acteur").await;
    let other = app.add_user("Jack Hackett", "acteur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;

    let draft = add_role(app, &owner, &project_id, "acteur", "Figurant", false).await;
    let response = app.post_apply(&candidate, &draft, None).await;
    assert_eq!(response.status().as_u16(), 409);

    let taken = add_role(app, &owner, &project_id, "acteur", "Rôle Principal", true).await;
    app.post_assign(&owner, &taken, &other.id.to_string()).await;
    let response = app.post_apply(&candidate, &taken, None).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_role(app: &mut TestApp) {
    let candidate = app.add_user("Dougal McGuire", "acteur").await;

    let response = app
        .post_apply(&candidate, &uuid::Uuid::new_v4().to_string(), None)
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
