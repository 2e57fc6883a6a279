//! [`SkillGateway`] over `/skills/...`.

use std::collections::BTreeMap;

use serde_json::Value;

use myhome_app::ports::SkillGateway;
use myhome_domain::error::MyHomeError;
use myhome_domain::skill::{InstallStatus, SkillAction, SkillRef, StoreSkill};

use crate::client::HttpGateway;
use crate::error::HttpError;
use crate::response::decode_or_default;

impl SkillGateway for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn store_catalog(&self) -> Result<Vec<StoreSkill>, MyHomeError> {
        let answer = self
            .post("/skills/loadStoreData/")
            .await
            .map_err(HttpError::into_domain)?;
        let catalog: BTreeMap<String, StoreSkill> =
            decode_or_default(answer).map_err(HttpError::into_domain)?;
        Ok(catalog.into_values().collect())
    }

    #[tracing::instrument(skip(self, skills), fields(count = skills.len()))]
    async fn install_skills(&self, skills: &[SkillRef]) -> Result<(), MyHomeError> {
        self.post_json("/skills/installSkills/", skills)
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }

    async fn install_status(&self, skill: &str) -> Result<InstallStatus, MyHomeError> {
        let answer = self
            .post_form("/skills/checkInstallStatus/", &[("skill", skill)])
            .await
            .map_err(HttpError::into_domain)?;
        Ok(match answer {
            Value::String(status) => InstallStatus::from(status.as_str()),
            other => InstallStatus::from(other.to_string().as_str()),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn skill_action(&self, action: SkillAction, skill: &str) -> Result<(), MyHomeError> {
        let path = format!("/skills/{}/", action.endpoint());
        self.post_form(&path, &[("id", action.form_id(skill))])
            .await
            .map_err(HttpError::into_domain)?;
        Ok(())
    }
}
