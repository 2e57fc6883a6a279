//! [`LocationGateway`] over `/myhome/Location/...`.

use serde::Deserialize;

use myhome_app::ports::LocationGateway;
use myhome_domain::error::MyHomeError;
use myhome_domain::id::ZoneId;

use crate::client::HttpGateway;
use crate::error::HttpError;
use crate::response::decode;

#[derive(Deserialize)]
struct Created {
    id: ZoneId,
}

impl LocationGateway for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn add_zone(&self, name: &str) -> Result<ZoneId, MyHomeError> {
        let answer = self
            .post_form("/myhome/Location/0/add", &[("name", name)])
            .await
            .map_err(HttpError::into_domain)?;
        let created: Created = decode(answer).map_err(HttpError::into_domain)?;
        Ok(created.id)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_zone(&self, zone: ZoneId) -> Result<(), MyHomeError> {
        let path = format!("/myhome/Location/{zone}/delete");
        self.post_form(&path, &[("id", zone.get())])
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn zone_synonyms(&self, zone: ZoneId) -> Result<Vec<String>, MyHomeError> {
        let path = format!("/myhome/Location/{zone}/getSettings");
        self.get(&path).await.map_err(HttpError::into_domain)
    }

    #[tracing::instrument(skip(self))]
    async fn add_synonym(&self, zone: ZoneId, value: &str) -> Result<(), MyHomeError> {
        let path = format!("/myhome/Location/{zone}/addSynonym");
        self.post_form(&path, &[("value", value)])
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_synonym(&self, zone: ZoneId, value: &str) -> Result<(), MyHomeError> {
        let path = format!("/myhome/Location/{zone}/deleteSynonym");
        self.post_form(&path, &[("value", value)])
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Seen, seen, serve};
    use axum::extract::{Form, Path, State};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    type Fields = HashMap<String, String>;

    fn location_router(log: &Seen) -> Router {
        Router::new()
            .route(
                "/myhome/Location/0/add",
                post(|State(log): State<Seen>, Form(form): Form<Fields>| async move {
                    let name = form["name"].clone();
                    log.lock().unwrap().push(format!("add {name}"));
                    if name == "Kitchen" {
                        Json(json!({"error": "Zone already exists"}))
                    } else {
                        Json(json!({"id": "42"}))
                    }
                }),
            )
            .route(
                "/myhome/Location/{id}/{action}",
                post(
                    |State(log): State<Seen>,
                     Path((id, action)): Path<(u64, String)>,
                     Form(form): Form<Fields>| async move {
                        let mut fields: Vec<_> = form.into_iter().map(|(k, v)| format!("{k}={v}")).collect();
                        fields.sort();
                        log.lock().unwrap().push(format!("{action} {id} {}", fields.join("&")));
                        Json(Value::Null)
                    },
                ),
            )
            .route(
                "/myhome/Location/{id}/getSettings",
                get(|| async { Json(json!(["cooking room", "galley"])) }),
            )
            .with_state(log.clone())
    }

    #[tokio::test]
    async fn should_return_id_of_created_zone() {
        let log = Seen::default();
        let gateway = serve(location_router(&log)).await;
        let id = gateway.add_zone("Attic").await.unwrap();
        assert_eq!(id, ZoneId::new(42));
        assert_eq!(seen(&log), vec!["add Attic".to_string()]);
    }

    #[tokio::test]
    async fn should_surface_backend_refusal_as_rejection() {
        let log = Seen::default();
        let gateway = serve(location_router(&log)).await;
        let err = gateway.add_zone("Kitchen").await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "Zone already exists");
    }

    #[tokio::test]
    async fn should_manage_zone_and_synonyms() {
        let log = Seen::default();
        let gateway = serve(location_router(&log)).await;
        let zone = ZoneId::new(4);

        let synonyms = gateway.zone_synonyms(zone).await.unwrap();
        gateway.add_synonym(zone, "scullery").await.unwrap();
        gateway.delete_synonym(zone, "galley").await.unwrap();
        gateway.delete_zone(zone).await.unwrap();

        assert_eq!(synonyms, vec!["cooking room".to_string(), "galley".to_string()]);
        assert_eq!(
            seen(&log),
            vec![
                "addSynonym 4 value=scullery".to_string(),
                "deleteSynonym 4 value=galley".to_string(),
                "delete 4 id=4".to_string(),
            ]
        );
    }
}
