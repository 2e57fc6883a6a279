//! [`DeviceGateway`] over `/myhome/Device/...` and `/myhome/DeviceType/...`.

use serde::Serialize;
use serde_json::{Map, Value};

use myhome_app::ports::DeviceGateway;
use myhome_domain::device::{DeviceLink, DeviceSettings, DeviceType, InstalledDevice, ToggleOutcome};
use myhome_domain::error::MyHomeError;
use myhome_domain::id::{DeviceId, DeviceTypeId, ZoneId};

use crate::client::HttpGateway;
use crate::error::HttpError;
use crate::response::{decode, decode_or_default, require_success};

#[derive(Serialize)]
struct NewDevice {
    #[serde(rename = "locationID")]
    location_id: ZoneId,
    #[serde(rename = "deviceTypeID")]
    device_type_id: DeviceTypeId,
}

fn device_path(device: DeviceId, action: &str) -> String {
    format!("/myhome/Device/{device}/{action}")
}

/// Settings come back with whatever JSON type the skill stored; the form
/// works on strings.
fn settings_from(value: Value) -> Result<DeviceSettings, HttpError> {
    let fields: Map<String, Value> = decode_or_default(value)?;
    Ok(fields
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

impl DeviceGateway for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn device_types(&self) -> Result<Vec<DeviceType>, MyHomeError> {
        self.get("/myhome/DeviceType/getList")
            .await
            .map_err(HttpError::into_domain)
    }

    #[tracing::instrument(skip(self))]
    async fn add_device(
        &self,
        zone: ZoneId,
        device_type: DeviceTypeId,
    ) -> Result<InstalledDevice, MyHomeError> {
        let form = NewDevice {
            location_id: zone,
            device_type_id: device_type,
        };
        let answer = self
            .post_form("/myhome/Device/0/add", &form)
            .await
            .map_err(HttpError::into_domain)?;
        decode(answer).map_err(HttpError::into_domain)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_device(&self, device: DeviceId) -> Result<(), MyHomeError> {
        let answer = self
            .post(&device_path(device, "delete"))
            .await
            .map_err(HttpError::into_domain)?;
        require_success(answer).map_err(HttpError::into_domain)
    }

    #[tracing::instrument(skip(self))]
    async fn change_location(&self, device: DeviceId, zone: ZoneId) -> Result<(), MyHomeError> {
        self.post(&device_path(device, &format!("changeLocation/{zone}")))
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn device_links(&self, device: DeviceId) -> Result<Vec<DeviceLink>, MyHomeError> {
        self.get(&device_path(device, "getLinks"))
            .await
            .map_err(HttpError::into_domain)
    }

    #[tracing::instrument(skip(self))]
    async fn add_link(&self, device: DeviceId, zone: ZoneId) -> Result<(), MyHomeError> {
        self.post(&device_path(device, &format!("addLink/{zone}")))
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn remove_link(&self, device: DeviceId, zone: ZoneId) -> Result<(), MyHomeError> {
        self.post(&device_path(device, &format!("removeLink/{zone}")))
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn toggle(&self, device: DeviceId) -> Result<ToggleOutcome, MyHomeError> {
        let answer = self
            .post(&device_path(device, "toggle"))
            .await
            .map_err(HttpError::into_domain)?;
        decode_or_default(answer).map_err(HttpError::into_domain)
    }

    #[tracing::instrument(skip(self))]
    async fn pair(&self, device: DeviceId) -> Result<(), MyHomeError> {
        self.post(&device_path(device, "pair"))
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn device_settings(&self, device: DeviceId) -> Result<DeviceSettings, MyHomeError> {
        let answer: Value = self
            .get(&device_path(device, "getSettings/0"))
            .await
            .map_err(HttpError::into_domain)?;
        settings_from(answer).map_err(HttpError::into_domain)
    }

    #[tracing::instrument(skip(self, settings), fields(count = settings.len()))]
    async fn save_device_settings(
        &self,
        device: DeviceId,
        settings: &DeviceSettings,
    ) -> Result<(), MyHomeError> {
        self.post_form(&device_path(device, "saveSettings/0"), settings)
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn device_icon(&self, device: DeviceId, cache_bust: i64) -> Result<Vec<u8>, MyHomeError> {
        self.get_bytes(&device_path(device, &format!("icon?random={cache_bust}")))
            .await
            .map_err(HttpError::into_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Seen, seen, serve};
    use axum::extract::{Form, Path, Query, State};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::BTreeMap;

    type Fields = BTreeMap<String, String>;

    fn record(log: &Seen, entry: String) {
        log.lock().unwrap().push(entry);
    }

    fn device_router(log: &Seen) -> Router {
        Router::new()
            .route(
                "/myhome/DeviceType/getList",
                get(|| async { Json(json!([{"id": 2, "skill": "Lights", "deviceType": "Lamp"}])) }),
            )
            .route(
                "/myhome/Device/0/add",
                post(|State(log): State<Seen>, Form(form): Form<Fields>| async move {
                    record(&log, format!("add {form:?}"));
                    Json(json!({"id": "11", "skill": "Lights", "deviceType": "Lamp"}))
                }),
            )
            .route(
                "/myhome/Device/{id}/delete",
                post(|Path(id): Path<u64>| async move {
                    match id {
                        7 => Json(json!({"success": false})),
                        8 => Json(json!({})),
                        _ => Json(json!({"success": true})),
                    }
                }),
            )
            .route(
                "/myhome/Device/{id}/{action}/{zone}",
                post(
                    |State(log): State<Seen>, Path((id, action, zone)): Path<(u64, String, u64)>| async move {
                        record(&log, format!("{action} {id} {zone}"));
                        if zone == 99 {
                            Json(json!({"error": "Unknown location"}))
                        } else {
                            Json(json!({}))
                        }
                    },
                ),
            )
            .route(
                "/myhome/Device/{id}/getLinks",
                get(|| async { Json(json!(r#"[{"deviceID": 3, "locationID": "1"}, {"locationID": 2}]"#)) }),
            )
            .route(
                "/myhome/Device/{id}/toggle",
                post(|Path(id): Path<u64>| async move {
                    if id == 5 {
                        String::from(r#"{"href": "https://camera.lan/stream"}"#)
                    } else {
                        String::new()
                    }
                }),
            )
            .route(
                "/myhome/Device/{id}/getSettings/0",
                get(|| async { Json(json!({"brightness": 50, "name": "Desk", "unset": null})) }),
            )
            .route(
                "/myhome/Device/{id}/saveSettings/0",
                post(|State(log): State<Seen>, Form(form): Form<Fields>| async move {
                    record(&log, format!("save {form:?}"));
                    Json(json!({"success": true}))
                }),
            )
            .route(
                "/myhome/Device/{id}/icon",
                get(|State(log): State<Seen>, Query(query): Query<Fields>| async move {
                    record(&log, format!("icon {}", query["random"]));
                    vec![0x89_u8, b'P', b'N', b'G']
                }),
            )
            .with_state(log.clone())
    }

    #[tokio::test]
    async fn should_install_device_in_zone() {
        let log = Seen::default();
        let gateway = serve(device_router(&log)).await;

        let types = gateway.device_types().await.unwrap();
        let installed = gateway
            .add_device(ZoneId::new(4), DeviceTypeId::new(2))
            .await
            .unwrap();

        assert_eq!(types[0].device_type, "Lamp");
        assert_eq!(installed.id, DeviceId::new(11));
        assert_eq!(
            seen(&log),
            vec![r#"add {"deviceTypeID": "2", "locationID": "4"}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn should_reject_unsuccessful_delete() {
        let gateway = serve(device_router(&Seen::default())).await;
        gateway.delete_device(DeviceId::new(3)).await.unwrap();
        let err = gateway.delete_device(DeviceId::new(7)).await.unwrap_err();
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn should_not_count_reply_without_success_as_deleted() {
        let gateway = serve(device_router(&Seen::default())).await;
        let err = gateway.delete_device(DeviceId::new(8)).await.unwrap_err();
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn should_move_and_link_devices() {
        let log = Seen::default();
        let gateway = serve(device_router(&log)).await;
        let device = DeviceId::new(3);

        gateway.change_location(device, ZoneId::new(2)).await.unwrap();
        gateway.add_link(device, ZoneId::new(1)).await.unwrap();
        gateway.remove_link(device, ZoneId::new(1)).await.unwrap();
        let err = gateway.change_location(device, ZoneId::new(99)).await.unwrap_err();

        assert_eq!(err.user_message(), "Unknown location");
        assert_eq!(
            seen(&log),
            vec![
                "changeLocation 3 2".to_string(),
                "addLink 3 1".to_string(),
                "removeLink 3 1".to_string(),
                "changeLocation 3 99".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn should_decode_links_sent_as_json_string() {
        let gateway = serve(device_router(&Seen::default())).await;
        let links = gateway.device_links(DeviceId::new(3)).await.unwrap();
        assert_eq!(
            links,
            vec![
                DeviceLink {
                    device_id: Some(DeviceId::new(3)),
                    location_id: ZoneId::new(1),
                },
                DeviceLink {
                    device_id: None,
                    location_id: ZoneId::new(2),
                },
            ]
        );
    }

    #[tokio::test]
    async fn should_read_toggle_outcome_from_empty_or_linked_answer() {
        let gateway = serve(device_router(&Seen::default())).await;
        let plain = gateway.toggle(DeviceId::new(3)).await.unwrap();
        let camera = gateway.toggle(DeviceId::new(5)).await.unwrap();
        assert_eq!(plain.href, None);
        assert_eq!(camera.href.as_deref(), Some("https://camera.lan/stream"));
    }

    #[tokio::test]
    async fn should_stringify_settings_and_post_them_back() {
        let log = Seen::default();
        let gateway = serve(device_router(&log)).await;
        let device = DeviceId::new(3);

        let mut settings = gateway.device_settings(device).await.unwrap();
        assert_eq!(settings["brightness"], "50");
        assert_eq!(settings["unset"], "");
        settings.insert("brightness".to_string(), "80".to_string());
        gateway.save_device_settings(device, &settings).await.unwrap();

        assert_eq!(
            seen(&log),
            vec![r#"save {"brightness": "80", "name": "Desk", "unset": ""}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn should_fetch_icon_with_cache_bust() {
        let log = Seen::default();
        let gateway = serve(device_router(&log)).await;
        let icon = gateway.device_icon(DeviceId::new(3), 1_700_000_000_123).await.unwrap();
        assert_eq!(icon, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(seen(&log), vec!["icon 1700000000123".to_string()]);
    }
}
