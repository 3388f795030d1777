use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::shared::state::AppState;
use crate::system::auth::middleware::{attach_user, require_auth};
use crate::{handlers, system};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/register",
            post(system::handlers::auth::register),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .put(system::handlers::auth::update_profile)
                .layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // CATALOGS
        // ========================================
        .route("/api/professions", get(handlers::a001_profession::search))
        .route("/api/hazards", get(handlers::a002_hazard::list))
        // ========================================
        // WORKSPACES
        // ========================================
        .route("/api/workspaces", post(handlers::a003_workspace::create))
        .route(
            "/api/workspaces/:id",
            get(handlers::a003_workspace::get_by_id).delete(handlers::a003_workspace::reset),
        )
        .route(
            "/api/workspaces/:id/draft/profession",
            put(handlers::a003_workspace::select_profession)
                .delete(handlers::a003_workspace::clear_profession),
        )
        .route(
            "/api/workspaces/:id/draft/hazards/toggle",
            post(handlers::a003_workspace::toggle_hazard),
        )
        .route(
            "/api/workspaces/:id/draft/commit",
            post(handlers::a003_workspace::commit),
        )
        .route(
            "/api/workspaces/:id/draft/cancel",
            post(handlers::a003_workspace::cancel_edit),
        )
        .route(
            "/api/workspaces/:id/entries",
            delete(handlers::a003_workspace::clear_entries),
        )
        .route(
            "/api/workspaces/:id/entries/:index",
            delete(handlers::a003_workspace::remove_entry),
        )
        .route(
            "/api/workspaces/:id/entries/:index/edit",
            post(handlers::a003_workspace::start_edit),
        )
        // ========================================
        // GENERATION (u001)
        // ========================================
        .route(
            "/api/workspaces/:id/generate",
            post(handlers::u001_generate_document::generate),
        )
        .route(
            "/api/workspaces/:id/entries/:index/card",
            post(handlers::u001_generate_document::generate_single_card),
        )
        .route(
            "/api/generation/:job_id",
            get(handlers::u001_generate_document::get_progress),
        )
        .route(
            "/api/generation/:job_id/cancel",
            post(handlers::u001_generate_document::cancel),
        )
        .route(
            "/api/generation/:job_id/download",
            get(handlers::u001_generate_document::download),
        )
        // ========================================
        // HISTORY
        // ========================================
        .route(
            "/api/workspaces/:id/history",
            get(handlers::a004_history::list_for_workspace),
        )
        .route(
            "/api/history",
            get(handlers::a004_history::list_for_user)
                .delete(handlers::a004_history::clear_all)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/history/:id",
            delete(handlers::a004_history::remove_one).layer(middleware::from_fn(require_auth)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), attach_user))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::catalog::Catalogs;
    use crate::shared::config::Config;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app_with_latency(latency_ms: u64) -> Router {
        let mut config = Config::default();
        config.generation.latency_ms = latency_ms;
        config.generation.single_card_latency_ms = latency_ms;
        configure_routes(AppState::new(config, Catalogs::embedded()))
    }

    fn app() -> Router {
        app_with_latency(0)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec(), headers)
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes, _) = send(app, method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_workspace(app: &Router) -> String {
        let (status, ws) = call(app, Method::POST, "/api/workspaces", None, None).await;
        assert_eq!(status, StatusCode::CREATED);
        ws["id"].as_str().unwrap().to_string()
    }

    async fn add_entry(app: &Router, ws: &str, profession_id: i64, hazards: &[&str]) -> Value {
        let (status, _) = call(
            app,
            Method::PUT,
            &format!("/api/workspaces/{ws}/draft/profession"),
            None,
            Some(json!({ "profession_id": profession_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        for hazard in hazards {
            let (status, body) = call(
                app,
                Method::POST,
                &format!("/api/workspaces/{ws}/draft/hazards/toggle"),
                None,
                Some(json!({ "name": hazard })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["selected"], true);
        }
        let (status, body) = call(
            app,
            Method::POST,
            &format!("/api/workspaces/{ws}/draft/commit"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// Запустить формирование и дождаться готового файла
    async fn generate(app: &Router, ws: &str, doc_type: &str, token: Option<&str>) -> (Value, String) {
        let (status, started) = call(
            app,
            Method::POST,
            &format!("/api/workspaces/{ws}/generate"),
            token,
            Some(json!({ "doc_type": doc_type })),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let job_id = started["job"]["jobId"].as_str().unwrap().to_string();

        let mut job = Value::Null;
        for _ in 0..200 {
            let (_, progress) =
                call(app, Method::GET, &format!("/api/generation/{job_id}"), None, None).await;
            if progress["job"]["status"] != "Pending" {
                job = progress;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(job["job"]["status"], "Completed");

        let (status, bytes, headers) = send(
            app,
            Method::GET,
            &format!("/api/generation/{job_id}/download"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename*=UTF-8''"));
        (job, String::from_utf8(bytes).unwrap())
    }

    fn normalized_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect()
    }

    async fn login(app: &Router, email: &str) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/system/auth/login",
            None,
            Some(json!({ "email": email, "password": "password1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_profession_search() {
        let app = app();
        let (_, body) = call(&app, Method::GET, "/api/professions?search=", None, None).await;
        assert_eq!(body, json!([]));

        let (_, body) = call(
            &app,
            Method::GET,
            "/api/professions?search=%D0%B1%D0%B5%D1%82",
            None,
            None,
        )
        .await;
        assert_eq!(body[0]["name"], "Бетонщик");
        assert_eq!(body[0]["siz_count"], 5);

        let (_, body) = call(
            &app,
            Method::GET,
            "/api/professions?search=%D0%B0&limit=2",
            None,
            None,
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_hazard_catalog() {
        let (status, body) = call(&app(), Method::GET, "/api/hazards", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_scenario_normy_and_history() {
        let app = app();
        let ws = create_workspace(&app).await;

        let first = add_entry(&app, &ws, 80, &["Электрический ток"]).await;
        assert_eq!(first["notice"]["message"], "Профессия добавлена");
        add_entry(&app, &ws, 300, &[]).await;

        let (job, text) = generate(&app, &ws, "normy", None).await;
        assert_eq!(job["job"]["historyAppended"], true);
        let lines = normalized_lines(&text);
        assert!(lines.contains(&"1 Бетонщик Электрический ток".to_string()));
        assert!(lines.contains(&"2 Маляр Базовые СИЗ".to_string()));

        let (_, history) = call(
            &app,
            Method::GET,
            &format!("/api/workspaces/{ws}/history"),
            None,
            None,
        )
        .await;
        let records = history["records"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["professionCount"], 2);
        assert_eq!(records[0]["type"], "normy");

        // Повторное формирование того же списка историю не меняет
        let (job, _) = generate(&app, &ws, "normy", None).await;
        assert_eq!(job["job"]["historyAppended"], false);
        let (_, history) = call(
            &app,
            Method::GET,
            &format!("/api/workspaces/{ws}/history"),
            None,
            None,
        )
        .await;
        assert_eq!(history["records"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_renumbers_document() {
        let app = app();
        let ws = create_workspace(&app).await;
        add_entry(&app, &ws, 80, &["Электрический ток"]).await;
        add_entry(&app, &ws, 300, &[]).await;

        let (status, body) = call(
            &app,
            Method::DELETE,
            &format!("/api/workspaces/{ws}/entries/0"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entries = body["workspace"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["profession_name"], "Маляр");

        let (_, text) = generate(&app, &ws, "normy", None).await;
        let lines = normalized_lines(&text);
        assert!(lines.contains(&"1 Маляр Базовые СИЗ".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("2 ")));
    }

    #[tokio::test]
    async fn test_generate_on_empty_list() {
        let app = app();
        let ws = create_workspace(&app).await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/generate"),
            None,
            Some(json!({ "doc_type": "normy" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "empty_list");
        assert_eq!(body["notice"]["level"], "info");
        assert_eq!(body["notice"]["message"], "Добавьте хотя бы одну профессию");

        let (_, history) = call(
            &app,
            Method::GET,
            &format!("/api/workspaces/{ws}/history"),
            None,
            None,
        )
        .await;
        assert_eq!(history["records"], json!([]));
    }

    #[tokio::test]
    async fn test_commit_validation_and_stale_index() {
        let app = app();
        let ws = create_workspace(&app).await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/draft/commit"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["profession"], "Выберите профессию");

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/entries/3/edit"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "index");
    }

    #[tokio::test]
    async fn test_edit_in_place() {
        let app = app();
        let ws = create_workspace(&app).await;
        add_entry(&app, &ws, 80, &[]).await;
        add_entry(&app, &ws, 300, &[]).await;

        let (_, body) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/entries/0/edit"),
            None,
            None,
        )
        .await;
        assert_eq!(body["workspace"]["draft"]["editing_index"], 0);

        let body = add_entry(&app, &ws, 150, &["Электрический ток"]).await;
        assert_eq!(body["notice"]["message"], "Профессия обновлена");
        let entries = body["workspace"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["profession_name"], "Газосварщик");
        assert_eq!(entries[1]["profession_name"], "Маляр");
    }

    #[tokio::test]
    async fn test_single_card_download_name() {
        let app = app();
        let ws = create_workspace(&app).await;
        add_entry(&app, &ws, 300, &[]).await;

        let (status, started) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/entries/0/card"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(started["job"]["singleCard"], true);

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/entries/5/card"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pending_job_conflicts_and_cancel() {
        let app = app_with_latency(60_000);
        let ws = create_workspace(&app).await;
        add_entry(&app, &ws, 300, &[]).await;

        let body = json!({ "doc_type": "anketa" });
        let uri = format!("/api/workspaces/{ws}/generate");
        let (_, started) = call(&app, Method::POST, &uri, None, Some(body.clone())).await;
        let job_id = started["job"]["jobId"].as_str().unwrap().to_string();

        let (status, _) = call(&app, Method::POST, &uri, None, Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(
            &app,
            Method::GET,
            &format!("/api/generation/{job_id}/download"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, cancelled) = call(
            &app,
            Method::POST,
            &format!("/api/generation/{job_id}/cancel"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cancelled["job"]["status"], "Cancelled");
        assert_eq!(cancelled["notice"]["message"], "Формирование отменено");
    }

    #[tokio::test]
    async fn test_user_history_requires_auth() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/history", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["kind"], "unauthorized");

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/system/auth/login",
            None,
            Some(json!({ "email": "ivan", "password": "123" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["email"], "Некорректный email");
        assert_eq!(body["fields"]["password"], "Минимум 8 символов");
    }

    #[tokio::test]
    async fn test_user_history_survives_workspace_reset() {
        let app = app();
        let token = login(&app, "ivan@company.ru").await;

        let ws = create_workspace(&app).await;
        add_entry(&app, &ws, 80, &[]).await;
        generate(&app, &ws, "anketa", Some(&token)).await;

        let (_, anon) = call(
            &app,
            Method::GET,
            &format!("/api/workspaces/{ws}/history"),
            None,
            None,
        )
        .await;
        assert_eq!(anon["records"], json!([]));

        let (status, _) = call(&app, Method::DELETE, &format!("/api/workspaces/{ws}"), None, None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, history) = call(&app, Method::GET, "/api/history", Some(&token), None).await;
        let records = history["records"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["title"], "Личные карточки");
        let id = records[0]["id"].as_i64().unwrap();

        let (status, body) = call(
            &app,
            Method::DELETE,
            &format!("/api/history/{}", id + 1),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], 0);

        let (_, body) = call(&app, Method::DELETE, "/api/history", Some(&token), None).await;
        assert_eq!(body["removed"], 1);
        assert_eq!(body["notice"]["message"], "История очищена");
    }

    async fn wait_job(app: &Router, job_id: &str) -> Value {
        for _ in 0..200 {
            let (_, progress) =
                call(app, Method::GET, &format!("/api/generation/{job_id}"), None, None).await;
            if progress["job"]["status"] != "Pending" {
                return progress;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job {job_id} is still pending");
    }

    #[tokio::test]
    async fn test_reset_during_generation_keeps_user_record() {
        let app = app_with_latency(150);
        let token = login(&app, "ivan@company.ru").await;
        let ws = create_workspace(&app).await;
        add_entry(&app, &ws, 80, &[]).await;

        let (status, started) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/generate"),
            Some(&token),
            Some(json!({ "doc_type": "normy" })),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let job_id = started["job"]["jobId"].as_str().unwrap().to_string();

        let (status, _) = call(&app, Method::DELETE, &format!("/api/workspaces/{ws}"), None, None).await;
        assert_eq!(status, StatusCode::OK);

        let done = wait_job(&app, &job_id).await;
        assert_eq!(done["job"]["status"], "Completed");

        let (_, history) = call(&app, Method::GET, "/api/history", Some(&token), None).await;
        let records = history["records"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["title"], "Нормы выдачи СИЗ");
    }

    #[tokio::test]
    async fn test_reset_during_generation_cancels_anonymous_job() {
        let app = app_with_latency(150);
        let ws = create_workspace(&app).await;
        add_entry(&app, &ws, 80, &[]).await;

        let (_, started) = call(
            &app,
            Method::POST,
            &format!("/api/workspaces/{ws}/generate"),
            None,
            Some(json!({ "doc_type": "normy" })),
        )
        .await;
        let job_id = started["job"]["jobId"].as_str().unwrap().to_string();

        let (status, _) = call(&app, Method::DELETE, &format!("/api/workspaces/{ws}"), None, None).await;
        assert_eq!(status, StatusCode::OK);

        let done = wait_job(&app, &job_id).await;
        assert_eq!(done["job"]["status"], "Cancelled");
    }

    #[tokio::test]
    async fn test_profile_update_and_logout() {
        let app = app();
        let token = login(&app, "Ivan.Petrov@company.ru").await;

        let (_, me) = call(&app, Method::GET, "/api/system/auth/me", Some(&token), None).await;
        assert_eq!(me["name"], "Ivan.Petrov");
        assert_eq!(me["id"], "ivan.petrov@company.ru");

        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/system/auth/me",
            Some(&token),
            Some(json!({ "name": "Иван" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Иван");

        let (status, _) = call(&app, Method::POST, "/api/system/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, Method::GET, "/api/system/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
