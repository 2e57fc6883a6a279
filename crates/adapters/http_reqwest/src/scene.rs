//! [`SceneGateway`] over `/myhome/load/` and `/myhome/save/`.

use myhome_app::ports::SceneGateway;
use myhome_domain::error::MyHomeError;
use myhome_domain::zone::{ZoneRecord, save_body};

use crate::client::HttpGateway;
use crate::error::HttpError;

const LOAD: &str = "/myhome/load/";
const SAVE: &str = "/myhome/save/";

impl SceneGateway for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn load_scene(&self) -> Result<Vec<ZoneRecord>, MyHomeError> {
        let zones: Vec<ZoneRecord> = self.get(LOAD).await.map_err(HttpError::into_domain)?;
        tracing::debug!(zones = zones.len(), "scene loaded");
        Ok(zones)
    }

    #[tracing::instrument(skip_all, fields(zones = zones.len()))]
    async fn save_scene(&self, zones: Vec<ZoneRecord>) -> Result<(), MyHomeError> {
        self.post_json(SAVE, &save_body(&zones))
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Seen, seen, serve};
    use axum::extract::State;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use myhome_domain::id::{DeviceId, ZoneId};
    use myhome_domain::zone::ZoneDisplay;
    use serde_json::Value;

    const SCENE: &str = r#"[
        {"id": "1", "name": "Kitchen",
         "display": {"x": "120px", "y": 80, "z-index": 2, "width": 300, "height": 200,
                     "walls": [{"x": 0, "y": 0, "width": 25, "height": 75, "rotation": 90}]},
         "devices": [{"id": 7, "uid": "undefined", "deviceTypeID": "2", "deviceType": "Lamp",
                      "skill": "Lights", "display": {"x": 10, "y": 10}}]},
        {"id": 2, "name": "Hall", "display": null}
    ]"#;

    #[tokio::test]
    async fn should_load_scene_with_lenient_fields() {
        let router = Router::new().route(LOAD, get(|| async { SCENE }));
        let gateway = serve(router).await;

        let zones = gateway.load_scene().await.unwrap();

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].id, ZoneId::new(1));
        assert_eq!((zones[0].display.x, zones[0].display.z_index), (120, 2));
        assert_eq!(zones[0].display.walls[0].rotation, 90);
        assert_eq!(zones[0].devices[0].id, DeviceId::new(7));
        assert!(!zones[0].devices[0].is_paired());
        assert_eq!(zones[1].display, ZoneDisplay::default());
    }

    #[tokio::test]
    async fn should_post_zones_keyed_by_id() {
        let log = Seen::default();
        let router = Router::new()
            .route(
                SAVE,
                post(|State(log): State<Seen>, Json(body): Json<Value>| async move {
                    let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
                    log.lock().unwrap().push(keys.join(","));
                    ""
                }),
            )
            .with_state(log.clone());
        let gateway = serve(router).await;
        let zone = |id: u64, name: &str| ZoneRecord {
            id: ZoneId::new(id),
            name: name.to_string(),
            display: ZoneDisplay::new(0, 0, 100, 100),
            devices: Vec::new(),
        };

        gateway
            .save_scene(vec![zone(3, "Attic"), zone(12, "Garage")])
            .await
            .unwrap();

        assert_eq!(seen(&log), vec!["12,3".to_string()]);
    }

    #[tokio::test]
    async fn should_report_unreachable_backend_as_transport_error() {
        let gateway = crate::testing::unreachable().await;
        let err = gateway.load_scene().await.unwrap_err();
        assert!(matches!(err, MyHomeError::Transport(_)));
    }
}
