//! [`BrokerGateway`] over `/home/getMqttConfig/`.

use myhome_app::ports::BrokerGateway;
use myhome_domain::channel::BrokerEndpoint;
use myhome_domain::error::MyHomeError;

use crate::client::HttpGateway;
use crate::error::HttpError;
use crate::response::decode;

impl BrokerGateway for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn broker_endpoint(&self) -> Result<BrokerEndpoint, MyHomeError> {
        let answer = self
            .post("/home/getMqttConfig/")
            .await
            .map_err(HttpError::into_domain)?;
        decode(answer).map_err(HttpError::into_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn should_read_broker_endpoint() {
        let router = Router::new().route(
            "/home/getMqttConfig/",
            post(|| async { Json(json!({"success": true, "host": "localhost", "port": 1884})) }),
        );
        let gateway = serve(router).await;
        let endpoint = gateway.broker_endpoint().await.unwrap();
        assert_eq!(
            endpoint.resolve("alice.local"),
            BrokerEndpoint {
                host: "alice.local".to_string(),
                port: 1884,
            }
        );
    }

    #[tokio::test]
    async fn should_reject_unavailable_broker_config() {
        let router = Router::new().route(
            "/home/getMqttConfig/",
            post(|| async { Json(json!({"success": false})) }),
        );
        let gateway = serve(router).await;
        assert!(gateway.broker_endpoint().await.unwrap_err().is_rejection());
    }
}
