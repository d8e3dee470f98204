use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{contracts, payments, permissions, statistics};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/contracts", post(contracts::create))
        .route("/contracts/query", post(contracts::query))
        .route(
            "/contracts/{id}",
            get(contracts::get)
                .patch(contracts::update)
                .delete(contracts::delete),
        )
        .route("/contracts/{id}/approve", post(contracts::approve))
        .route("/contracts/{id}/activate", post(contracts::activate))
        .route("/contracts/{id}/cancel", post(contracts::cancel))
        .route("/contracts/{id}/payments", get(payments::list))
        .route("/payments", post(payments::create))
        .route("/payments/{id}/reverse", post(payments::reverse))
        .route("/stats", get(statistics::get_stats))
        .route("/permissions/check", post(permissions::check))
        .route("/permissions/toggle", post(permissions::toggle))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;
    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
    };

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router(state)).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    fn app() -> Router {
        let state = ServerState {
            engine: Arc::new(RwLock::new(Engine::builder().build())),
        };
        router(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(value) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// A contract window far in the future: deterministically `approved`
    /// after approval, whatever the wall clock says.
    fn upcoming_contract(number: &str) -> Value {
        json!({
            "contract_number": number,
            "customer_id": Uuid::new_v4(),
            "customer_name": "Impresa Rossi",
            "contract_type": "rental",
            "total_value_minor": 15_000,
            "start_date": "2100-01-15",
            "end_date": "2100-07-15",
            "priority": "medium",
            "notes": null,
        })
    }

    /// A contract window far in the past: deterministically `expired` until
    /// fully settled.
    fn past_contract(number: &str) -> Value {
        json!({
            "contract_number": number,
            "customer_id": Uuid::new_v4(),
            "customer_name": "Ditta Bianchi",
            "contract_type": "maintenance",
            "total_value_minor": 10_000,
            "start_date": "2000-01-15",
            "end_date": "2000-07-15",
            "priority": "high",
            "notes": null,
        })
    }

    #[tokio::test]
    async fn contract_and_payment_round_trip() {
        let app = app();

        let (status, contract) =
            send(&app, "POST", "/contracts", Some(upcoming_contract("CTR-1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(contract["lifecycle_status"], "draft");
        assert_eq!(contract["payment_status"], "unpaid");
        assert_eq!(contract["remaining_minor"], 15_000);
        let id = contract["id"].as_str().unwrap().to_string();

        let (status, approved) =
            send(&app, "POST", &format!("/contracts/{id}/approve"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(approved["lifecycle_status"], "approved");

        let (status, payment) = send(
            &app,
            "POST",
            "/payments",
            Some(json!({
                "contract_id": id,
                "amount_minor": 7_500,
                "method": "bank_transfer",
                "date": "2100-02-01",
                "reference": "INV-44",
                "notes": null,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payment["amount"], 7_500);

        let (status, contract) = send(&app, "GET", &format!("/contracts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(contract["paid_minor"], 7_500);
        assert_eq!(contract["remaining_minor"], 7_500);
        assert_eq!(contract["payment_status"], "partially_paid");

        // Overpayment bounces with 422 and changes nothing.
        let (status, error) = send(
            &app,
            "POST",
            "/payments",
            Some(json!({
                "contract_id": id,
                "amount_minor": 20_000,
                "method": "cash",
                "date": "2100-02-02",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(error["error"].as_str().unwrap().contains("Overpayment"));
        let (_, contract) = send(&app, "GET", &format!("/contracts/{id}"), None).await;
        assert_eq!(contract["paid_minor"], 7_500);

        let (status, payments) =
            send(&app, "GET", &format!("/contracts/{id}/payments"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payments.as_array().unwrap().len(), 1);

        let (status, stats) = send(&app, "GET", "/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["total"], 1);
        assert_eq!(stats["paid_minor"], 7_500);
    }

    #[tokio::test]
    async fn expired_contract_completes_once_settled() {
        let app = app();

        let (_, contract) = send(&app, "POST", "/contracts", Some(past_contract("CTR-9"))).await;
        let id = contract["id"].as_str().unwrap().to_string();
        send(&app, "POST", &format!("/contracts/{id}/approve"), None).await;

        let (_, contract) = send(&app, "GET", &format!("/contracts/{id}"), None).await;
        assert_eq!(contract["lifecycle_status"], "expired");

        // The overdue filter finds it.
        let (status, result) = send(
            &app,
            "POST",
            "/contracts/query",
            Some(json!({ "has_overdue": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["contracts"].as_array().unwrap().len(), 1);
        assert_eq!(result["stats"]["lifecycle"]["expired"], 1);

        send(
            &app,
            "POST",
            "/payments",
            Some(json!({
                "contract_id": id,
                "amount_minor": 10_000,
                "method": "check",
                "date": "2000-08-01",
            })),
        )
        .await;

        let (_, contract) = send(&app, "GET", &format!("/contracts/{id}"), None).await;
        assert_eq!(contract["lifecycle_status"], "completed");
        assert_eq!(contract["payment_status"], "fully_paid");

        let (_, result) = send(
            &app,
            "POST",
            "/contracts/query",
            Some(json!({ "has_overdue": true })),
        )
        .await;
        assert!(result["contracts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancel_surfaces_outstanding_balance_as_warning() {
        let app = app();

        let (_, contract) =
            send(&app, "POST", "/contracts", Some(upcoming_contract("CTR-2"))).await;
        let id = contract["id"].as_str().unwrap().to_string();
        send(&app, "POST", &format!("/contracts/{id}/approve"), None).await;

        let (status, cancelled) =
            send(&app, "POST", &format!("/contracts/{id}/cancel"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cancelled["contract"]["lifecycle_status"], "cancelled");
        assert!(
            cancelled["warning"]
                .as_str()
                .unwrap()
                .contains("outstanding balance 150.00")
        );

        // A cancelled contract no longer accepts postings.
        let (status, _) = send(
            &app,
            "POST",
            "/payments",
            Some(json!({
                "contract_id": id,
                "amount_minor": 100,
                "method": "cash",
                "date": "2100-02-01",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_and_duplicate_contracts_map_to_http_errors() {
        let app = app();

        let (status, _) = send(
            &app,
            "GET",
            &format!("/contracts/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, "POST", "/contracts", Some(upcoming_contract("CTR-3"))).await;
        let (status, _) =
            send(&app, "POST", "/contracts", Some(upcoming_contract("CTR-3"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn delete_removes_an_unpaid_contract() {
        let app = app();

        let (_, contract) =
            send(&app, "POST", "/contracts", Some(upcoming_contract("CTR-4"))).await;
        let id = contract["id"].as_str().unwrap().to_string();

        let (status, _) = send(&app, "DELETE", &format!("/contracts/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("/contracts/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn permission_check_and_category_toggle() {
        let app = app();
        let role = json!({
            "id": "accountant",
            "name": "Accountant",
            "categories": [{
                "id": "contracts",
                "name": "Contracts",
                "permissions": [
                    { "id": "contracts.view", "enabled": true },
                    { "id": "contracts.cancel", "enabled": false },
                ],
            }],
        });

        let (status, result) = send(
            &app,
            "POST",
            "/permissions/check",
            Some(json!({ "role": role, "permission_id": "contracts.view" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["allowed"], true);

        let (_, result) = send(
            &app,
            "POST",
            "/permissions/check",
            Some(json!({ "role": role, "permission_id": "contracts.cancel" })),
        )
        .await;
        assert_eq!(result["allowed"], false);

        // Partially enabled flips everything on.
        let (status, toggled) = send(
            &app,
            "POST",
            "/permissions/toggle",
            Some(json!({ "role": role, "category_id": "contracts" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let flags = toggled["categories"][0]["permissions"].as_array().unwrap();
        assert!(flags.iter().all(|flag| flag["enabled"] == true));

        // Fully enabled flips everything off.
        let (_, toggled) = send(
            &app,
            "POST",
            "/permissions/toggle",
            Some(json!({ "role": toggled, "category_id": "contracts" })),
        )
        .await;
        let flags = toggled["categories"][0]["permissions"].as_array().unwrap();
        assert!(flags.iter().all(|flag| flag["enabled"] == false));

        let (status, _) = send(
            &app,
            "POST",
            "/permissions/toggle",
            Some(json!({ "role": role, "category_id": "inventory" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
