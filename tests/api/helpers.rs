use reqwest::{cookie::Jar, Client, Method, RequestBuilder, Response, Url};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tita::{
    app_state::{AppState, BannedTokenStoreType, ProfileStoreType, ProjectStoreType},
    domain::{Connection, Profile, ProfileId, ProfileStore},
    services::{
        data_stores::{
            HashmapBannedTokenStore, HashmapProfileStore, HashmapProjectStore,
        },
        http_notification_client::HttpNotificationClient,
    },
    utils::{
        auth::generate_auth_token,
        constants::{test, JWT_COOKIE_NAME},
    },
    Application,
};
use tokio::sync::RwLock;
use wiremock::{
    matchers::method, matchers::path, Mock, MockServer, ResponseTemplate,
};

pub struct TestApp {
    pub address: String,
    pub banned_token_store: BannedTokenStoreType,
    pub cookie_jar: Arc<Jar>,
    pub http_client: reqwest::Client,
    pub notification_server: MockServer,
    pub profile_store: ProfileStoreType,
    pub project_store: ProjectStoreType,
}

/// A seeded profile and a session token issued for it.
pub struct TestUser {
    pub id: ProfileId,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        test::set_jwt_secret();

        let banned_token_store =
            Arc::new(RwLock::new(HashmapBannedTokenStore::default()));
        let profile_store =
            Arc::new(RwLock::new(HashmapProfileStore::default()));
        let project_store =
            Arc::new(RwLock::new(HashmapProjectStore::default()));

        let notification_server = MockServer::start().await;
        Mock::given(path("/notifications"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&notification_server)
            .await;
        let notification_client = Arc::new(configure_notification_client(
            notification_server.uri(),
        ));

        let app_state = AppState::new(
            banned_token_store.clone(),
            notification_client,
            profile_store.clone(),
            project_store.clone(),
        );

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .unwrap();

        Self {
            address,
            banned_token_store,
            cookie_jar,
            http_client,
            notification_server,
            profile_store,
            project_store,
        }
    }

    fn request(&self, method: Method, route: &str, user: &TestUser) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}{}", &self.address, route))
            .bearer_auth(&user.token)
    }

    /// Seeds a profile and returns a user holding a valid session token.
    pub async fn add_user(&self, full_name: &str, primary_role: &str) -> TestUser {
        let mut profile = Profile::new(ProfileId::default(), full_name);
        profile.primary_role = Some(primary_role.to_owned());
        profile.city = Some("Paris".to_owned());
        self.profile_store
            .write()
            .await
            .add_profile(&profile)
            .await
            .expect("Failed to seed profile");

        let token = generate_auth_token(&profile.id)
            .expect("Failed to generate auth token")
            .expose_secret()
            .to_owned();

        TestUser {
            id: profile.id,
            token,
        }
    }

    pub async fn connect(&self, a: &TestUser, b: &TestUser) {
        self.profile_store
            .write()
            .await
            .add_connection(&Connection::accepted(a.id, b.id))
            .await
            .expect("Failed to seed connection");
    }

    /// Stores `user`'s token in the cookie jar, as a browser would after
    /// signing in.
    pub fn set_session_cookie(&self, user: &TestUser) {
        let url = Url::parse(&self.address).expect("Failed to parse app URL");
        self.cookie_jar.add_cookie_str(
            &format!("{}={}; HttpOnly; SameSite=Lax; Path=/", JWT_COOKIE_NAME, user.token),
            &url,
        );
    }

    pub async fn post_logout(&self) -> Response {
        self.http_client
            .post(format!("{}/auth/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_verify_token<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/auth/verify-token", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_session(&self) -> Response {
        self.http_client
            .get(format!("{}/auth/session", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_projects_new<Body>(&self, user: &TestUser, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.request(Method::POST, "/projects/new", user)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_projects_list(&self, user: &TestUser) -> Response {
        self.request(Method::GET, "/projects/list", user)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_project(&self, user: &TestUser, project_id: &str) -> Response {
        self.request(Method::GET, "/projects/project", user)
            .query(&[("projectId", project_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_role<Body>(&self, user: &TestUser, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.request(Method::POST, "/projects/roles", user)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_roles(&self, user: &TestUser, project_id: &str) -> Response {
        self.request(Method::GET, "/projects/roles", user)
            .query(&[("projectId", project_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_role_details<Body>(
        &self,
        user: &TestUser,
        role_id: &str,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.request(Method::PUT, "/roles/details", user)
            .query(&[("roleId", role_id)])
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_publish(&self, user: &TestUser, role_id: &str) -> Response {
        self.request(Method::POST, "/roles/publish", user)
            .query(&[("roleId", role_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_unpublish(&self, user: &TestUser, role_id: &str) -> Response {
        self.request(Method::POST, "/roles/unpublish", user)
            .query(&[("roleId", role_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_role(&self, user: &TestUser, role_id: &str) -> Response {
        self.request(Method::DELETE, "/roles/role", user)
            .query(&[("roleId", role_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_candidates(
        &self,
        user: &TestUser,
        role_id: &str,
        query: &str,
    ) -> Response {
        self.request(Method::GET, "/roles/candidates", user)
            .query(&[("roleId", role_id), ("query", query)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_assign(
        &self,
        user: &TestUser,
        role_id: &str,
        candidate_id: &str,
    ) -> Response {
        self.request(Method::POST, "/roles/assign", user)
            .query(&[("roleId", role_id)])
            .json(&serde_json::json!({ "candidateId": candidate_id }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_remove_assignment(&self, user: &TestUser, role_id: &str) -> Response {
        self.request(Method::POST, "/roles/remove-assignment", user)
            .query(&[("roleId", role_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_invitation(
        &self,
        user: &TestUser,
        role_id: &str,
        accept: bool,
    ) -> Response {
        self.request(Method::POST, "/roles/invitation", user)
            .query(&[("roleId", role_id)])
            .json(&serde_json::json!({ "accept": accept }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_apply(
        &self,
        user: &TestUser,
        role_id: &str,
        message: Option<&str>,
    ) -> Response {
        self.request(Method::POST, "/roles/apply", user)
            .query(&[("roleId", role_id)])
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_role_applications(&self, user: &TestUser, role_id: &str) -> Response {
        self.request(Method::GET, "/roles/applications", user)
            .query(&[("roleId", role_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_my_applications(&self, user: &TestUser) -> Response {
        self.request(Method::GET, "/applications/mine", user)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_accept(&self, user: &TestUser, application_id: &str) -> Response {
        self.request(Method::POST, "/applications/accept", user)
            .query(&[("applicationId", application_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_reject(&self, user: &TestUser, application_id: &str) -> Response {
        self.request(Method::POST, "/applications/reject", user)
            .query(&[("applicationId", application_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_application(&self, user: &TestUser, application_id: &str) -> Response {
        self.request(Method::DELETE, "/applications/application", user)
            .query(&[("applicationId", application_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Bodies of every notification the gateway received, in order.
    pub async fn sent_notifications(&self) -> Vec<Value> {
        self.notification_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                serde_json::from_slice(&request.body)
                    .expect("Notification body is not JSON")
            })
            .collect()
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }
}

fn configure_notification_client(base_url: String) -> HttpNotificationClient {
    let auth_token = secrecy::Secret::new("auth_token".to_owned());

    let http_client = Client::builder()
        .timeout(test::notification_client::TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");

    HttpNotificationClient::new(base_url, auth_token, http_client)
}

pub async fn get_json_response_body(response: Response) -> Value {
    let body: Value = response
        .json()
        .await
        .expect("failed to parse response body JSON");
    body
}

pub fn get_str<'a>(body: &'a Value, field: &str) -> &'a str {
    body.get(field)
        .unwrap_or_else(|| panic!("No {field} in response: {body}"))
        .as_str()
        .unwrap_or_else(|| panic!("{field} is not a string: {body}"))
}

pub async fn add_new_project(app: &TestApp, owner: &TestUser, title: &str) -> String {
    let response = app
        .post_projects_new(
            owner,
            &serde_json::json!({
                "title": title,
                "projectType": "court-métrage",
                "city": "Paris"
            }),
        )
        .await;

    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to add new project with title: {title}"
    );

    let body = get_json_response_body(response).await;
    get_str(&body, "id").to_owned()
}

pub async fn add_role(
    app: &TestApp,
    owner: &TestUser,
    project_id: &str,
    category: &str,
    title: &str,
    publish: bool,
) -> String {
    let response = app
        .post_role(
            owner,
            &serde_json::json!({
                "projectId": project_id,
                "category": category,
                "title": title,
                "publish": publish
            }),
        )
        .await;

    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to add role with title: {title}"
    );

    let body = get_json_response_body(response).await;
    get_str(&body, "id").to_owned()
}

pub async fn apply(app: &TestApp, candidate: &TestUser, role_id: &str) -> String {
    let response = app.post_apply(candidate, role_id, None).await;
    assert_eq!(response.status().as_u16(), 201, "Failed to apply");
    let body = get_json_response_body(response).await;
    get_str(&body, "id").to_owned()
}

/// Current state of a role, read back through the grouped listing.
pub async fn find_role(
    app: &TestApp,
    owner: &TestUser,
    project_id: &str,
    role_id: &str,
) -> Value {
    let body = get_json_response_body(app.get_roles(owner, project_id).await).await;
    body["sections"]
        .as_array()
        .expect("No sections in response")
        .iter()
        .flat_map(|section| section["groups"].as_array().cloned().unwrap_or_default())
        .flat_map(|group| group["roles"].as_array().cloned().unwrap_or_default())
        .find(|role| role["id"] == role_id)
        .unwrap_or_else(|| panic!("Role {role_id} not in listing"))
}
