use serde_json::json;
use test_context::test_context;

use crate::helpers::{add_new_project, add_role, get_json_response_body, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn should_search_within_connections(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let friend = app.add_user("Jean Dupont", "son").await;
    let stranger = app.add_user("Jean Martin", "son").await;
    app.connect(&owner, &friend).await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "candidates": {
          "type": "array",
          "maxItems": 20,
          "items": {
            "type": "object",
            "required": ["profile", "score", "matchesCategory"]
          }
        }
      },
      "required": ["candidates"]
    });

    let response = app.get_candidates(&owner, &role_id, "jean").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert!(jsonschema::is_valid(&schema, &body));

    let candidates = body["candidates"].as_array().expect("No candidates");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["profile"]["id"], friend.id.to_string());
    assert_ne!(candidates[0]["profile"]["id"], stranger.id.to_string());
    assert_eq!(candidates[0]["matchesCategory"], true);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_by_category_for_empty_query(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let sound = app.add_user("Zoé Son", "son").await;
    let actor = app.add_user("Alice Actrice", "acteur").await;
    app.connect(&owner, &sound).await;
    app.connect(&actor, &owner).await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    let body = get_json_response_body(app.get_candidates(&owner, &role_id, "").await).await;
    let candidates = body["candidates"].as_array().expect("No candidates");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["profile"]["id"], sound.id.to_string());
    assert!(candidates[0]["score"].is_null());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_at_most_20_candidates(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    for i in 0..25 {
        let profile = app.add_user(&format!("Marie {i}"), "son").await;
        app.connect(&owner, &profile).await;
    }
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    let body = get_json_response_body(app.get_candidates(&owner, &role_id, "marie").await).await;
    assert_eq!(body["candidates"].as_array().expect("No candidates").len(), 20);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_if_not_manager(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let stranger = app.add_user("Father Dick Byrne", "realisateur").await;
    let project_id = add_new_project(app, &owner, "Craggy Island").await;
    let role_id = add_role(app, &owner, &project_id, "son", "Perchman", true).await;

    let response = app.get_candidates(&stranger, &role_id, "jean").await;
    assert_eq!(response.status().as_u16(), 403);
}
