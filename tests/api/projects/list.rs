use serde_json::json;
use test_context::test_context;

use crate::helpers::{add_new_project, get_json_response_body, TestApp, TestUser};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_collection_if_no_projects(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;

    let response = app.get_projects_list(&owner).await;
    assert_eq!(response.status().as_u16(), 200);

    let expected_body = json!({"projects": []});
    assert_eq!(get_json_response_body(response).await, expected_body);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_only_list_callers_projects(app: &mut TestApp) {
    let owner = app.add_user("Father Ted", "realisateur").await;
    let other = app.add_user("Father Dick Byrne", "realisateur").await;

    let first = add_new_project(app, &owner, "Craggy Island").await;
    let second = add_new_project(app, &owner, "Rugged Island").await;
    add_new_project(app, &other, "Speed 3").await;

    let response = app.get_projects_list(&owner).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let ids: Vec<&str> = body["projects"]
        .as_array()
        .expect("No projects in response")
        .iter()
        .filter_map(|project| project["id"].as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.as_str()));
    assert!(ids.contains(&second.as_str()));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_invalid_token(app: &mut TestApp) {
    let stranger = TestUser {
        id: Default::default(),
        token: "not-a-jwt".to_owned(),
    };

    let response = app.get_projects_list(&stranger).await;
    assert_eq!(response.status().as_u16(), 401);
}
