use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use client_core::HttpRegistrationClient;
use crossbeam_channel::{bounded, Receiver};
use form_controller::{
    Alert, ChannelFormHost, FormController, FormField, RegistrationForm, RoleSelection,
    SubmissionOutcome, UiEvent,
};
use shared::domain::{Role, RoleId};
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

#[derive(Clone)]
struct ApiState {
    register_status: StatusCode,
    register_body: serde_json::Value,
    registrations: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn list_roles() -> Json<serde_json::Value> {
    Json(serde_json::json!([{ "id": 3, "name_rol": "Admin" }]))
}

async fn register(
    State(state): State<ApiState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    state.registrations.lock().await.push(payload);
    (state.register_status, Json(state.register_body.clone()))
}

async fn spawn_api(
    register_status: StatusCode,
    register_body: serde_json::Value,
) -> (Url, Arc<Mutex<Vec<serde_json::Value>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let registrations = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/rol/", get(list_roles))
        .route("/auth/register", post(register))
        .with_state(ApiState {
            register_status,
            register_body,
            registrations: registrations.clone(),
        });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (
        Url::parse(&format!("http://{addr}")).expect("url"),
        registrations,
    )
}

async fn activated_form(base_url: Url) -> (Arc<FormController>, Receiver<UiEvent>) {
    let (ui_tx, ui_rx) = bounded(16);
    let controller = FormController::new(
        Arc::new(HttpRegistrationClient::new(base_url)),
        Arc::new(ChannelFormHost::new(ui_tx)),
    );

    let roles = controller.activate().await.expect("roles");
    assert_eq!(
        roles,
        vec![Role {
            id: RoleId(3),
            display_name: "Admin".into(),
        }]
    );

    controller.open_dialog().await;
    for (field, value) in [
        (FormField::Username, "jdoe"),
        (FormField::Email, "jdoe@example.com"),
        (FormField::NationalId, "1002003004"),
        (FormField::Age, "31"),
        (FormField::Phone, "3001234567"),
        (FormField::FirstName, "Jane"),
        (FormField::LastName, "Doe"),
        (FormField::Password, "s3cret"),
    ] {
        controller.set_field(field, value).await;
    }
    let selection = controller.set_role(&roles[0].id.to_string()).await;
    assert_eq!(selection, RoleSelection::Selected(RoleId(3)));

    (controller, ui_rx)
}

#[tokio::test]
async fn accepted_registration_resets_and_closes() {
    let (base_url, registrations) =
        spawn_api(StatusCode::CREATED, serde_json::json!({ "id": 9 })).await;
    let (controller, ui_rx) = activated_form(base_url).await;

    let outcome = controller.submit().await.expect("submit");

    assert_eq!(
        outcome,
        SubmissionOutcome::Success(serde_json::json!({ "id": 9 }))
    );
    assert_eq!(controller.snapshot().await, RegistrationForm::default());
    assert!(!controller.is_open().await);
    assert_eq!(
        ui_rx.try_iter().collect::<Vec<_>>(),
        vec![
            UiEvent::Alert(Alert::success("User registered successfully.")),
            UiEvent::RegisterSucceeded,
            UiEvent::CloseRequested,
        ]
    );

    let registrations = registrations.lock().await;
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0]["Rol_persona"], 3);
    assert_eq!(registrations[0]["Telefono_persona"], "3001234567");
}

#[tokio::test]
async fn rejected_registration_keeps_everything() {
    let (base_url, _) = spawn_api(
        StatusCode::BAD_REQUEST,
        serde_json::json!({ "message": "email taken" }),
    )
    .await;
    let (controller, ui_rx) = activated_form(base_url).await;
    let before = controller.snapshot().await;

    let outcome = controller.submit().await.expect("submit");

    assert_eq!(
        outcome,
        SubmissionOutcome::ServerRejected("email taken".into())
    );
    assert_eq!(controller.snapshot().await, before);
    assert!(controller.is_open().await);
    assert_eq!(
        ui_rx.try_iter().collect::<Vec<_>>(),
        vec![UiEvent::Alert(Alert::error(
            "There was an error registering the user. email taken"
        ))]
    );
}
