//! Live device updates pushed over the channel.

use myhome_domain::channel::{ChannelMessage, DEVICE_UPDATED_TOPIC, DeviceUpdate};

use crate::scene::Scene;

/// Applies device status notifications to the scene.
///
/// Anything it cannot use (other topics, malformed JSON, non-status updates,
/// devices that are not rendered) is dropped with a debug log.
#[derive(Debug, Clone)]
pub struct LiveUpdateListener {
    topic: String,
}

impl Default for LiveUpdateListener {
    fn default() -> Self {
        Self {
            topic: DEVICE_UPDATED_TOPIC.to_string(),
        }
    }
}

impl LiveUpdateListener {
    /// Topics to subscribe to on every (re)connect.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        vec![self.topic.clone()]
    }

    /// Handle one message. Returns whether the scene changed.
    pub fn handle(&self, scene: &mut Scene, message: &ChannelMessage) -> bool {
        if message.topic != self.topic {
            tracing::debug!(topic = %message.topic, "ignoring message on unexpected topic");
            return false;
        }
        let Some(update) = DeviceUpdate::from_payload(&message.payload) else {
            tracing::debug!("ignoring malformed device update");
            return false;
        };
        if !update.is_status() {
            tracing::debug!(kind = %update.kind, "ignoring non-status device update");
            return false;
        }
        let patched = scene.patch_device_status(update.id);
        if !patched {
            tracing::debug!(device = %update.id, "status update for a device not in the scene");
        }
        patched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myhome_domain::device::DeviceRecord;
    use myhome_domain::geometry::Placement;
    use myhome_domain::id::{DeviceId, ZoneId};
    use myhome_domain::zone::{ZoneDisplay, ZoneRecord};

    fn scene_with_device(id: u64) -> Scene {
        Scene::build(vec![ZoneRecord {
            id: ZoneId::new(1),
            name: "Kitchen".to_string(),
            display: ZoneDisplay::new(0, 0, 100, 100),
            devices: vec![DeviceRecord {
                id: DeviceId::new(id),
                uid: None,
                device_type_id: None,
                device_type: "Lamp".to_string(),
                skill: "Lights".to_string(),
                name: None,
                display: Placement::new(5, 5, 50, 50),
            }],
        }])
    }

    fn message(payload: &str) -> ChannelMessage {
        ChannelMessage::new(DEVICE_UPDATED_TOPIC, payload.as_bytes())
    }

    #[test]
    fn should_refresh_icon_on_status_update() {
        let mut scene = scene_with_device(7);
        let before = scene.device_by_id(DeviceId::new(7)).unwrap().icon_stamp;
        let listener = LiveUpdateListener::default();
        assert!(listener.handle(&mut scene, &message(r#"{"type":"status","id":"7"}"#)));
        assert!(scene.device_by_id(DeviceId::new(7)).unwrap().icon_stamp > before);
    }

    #[test]
    fn should_ignore_status_for_unrendered_device() {
        let mut scene = scene_with_device(3);
        let before = scene.serialize();
        let listener = LiveUpdateListener::default();
        assert!(!listener.handle(&mut scene, &message(r#"{"type":"status","id":"7"}"#)));
        assert_eq!(scene.serialize(), before);
    }

    #[test]
    fn should_ignore_malformed_and_irrelevant_messages() {
        let mut scene = scene_with_device(7);
        let listener = LiveUpdateListener::default();
        assert!(!listener.handle(&mut scene, &message("{not json")));
        assert!(!listener.handle(&mut scene, &message(r#"{"type":"deleted","id":7}"#)));
        let other = ChannelMessage::new("projectalice/other", r#"{"type":"status","id":7}"#);
        assert!(!listener.handle(&mut scene, &other));
    }

    #[test]
    fn should_subscribe_to_device_topic() {
        assert_eq!(
            LiveUpdateListener::default().topics(),
            vec![DEVICE_UPDATED_TOPIC.to_string()]
        );
    }
}
