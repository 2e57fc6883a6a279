//! [`ConsoleGateway`] over `/admin/...`.

use serde::Deserialize;

use myhome_app::ports::ConsoleGateway;
use myhome_domain::error::MyHomeError;
use myhome_domain::utility::UtilityAction;

use crate::client::HttpGateway;
use crate::error::HttpError;
use crate::response::decode_or_default;

#[derive(Default, Deserialize)]
struct Readiness {
    #[serde(default)]
    success: bool,
}

impl ConsoleGateway for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn run_utility(&self, action: UtilityAction) -> Result<(), MyHomeError> {
        self.post(&format!("/admin/{}/", action.endpoint()))
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    async fn are_you_ready(&self) -> Result<bool, MyHomeError> {
        let answer = self
            .post_raw("/admin/areYouReady/")
            .await
            .map_err(HttpError::into_domain)?;
        let readiness: Readiness = decode_or_default(answer).map_err(HttpError::into_domain)?;
        Ok(readiness.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Seen, seen, serve};
    use axum::extract::{Path, State};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn should_post_utility_endpoint() {
        let log = Seen::default();
        let router = Router::new()
            .route(
                "/admin/{endpoint}/",
                post(|State(log): State<Seen>, Path(endpoint): Path<String>| async move {
                    log.lock().unwrap().push(endpoint);
                    ""
                }),
            )
            .with_state(log.clone());
        let gateway = serve(router).await;

        gateway.run_utility(UtilityAction::Update).await.unwrap();
        gateway.run_utility(UtilityAction::TrainAssistant).await.unwrap();

        assert_eq!(
            seen(&log),
            vec!["updatee".to_string(), "trainAssistant".to_string()]
        );
    }

    #[tokio::test]
    async fn should_read_not_ready_as_false() {
        let ready = Arc::new(AtomicBool::new(false));
        let router = Router::new()
            .route(
                "/admin/areYouReady/",
                post(|State(ready): State<Arc<AtomicBool>>| async move {
                    Json(json!({"success": ready.load(Ordering::SeqCst)}))
                }),
            )
            .with_state(ready.clone());
        let gateway = serve(router).await;

        assert!(!gateway.are_you_ready().await.unwrap());
        ready.store(true, Ordering::SeqCst);
        assert!(gateway.are_you_ready().await.unwrap());
    }
}
