//! Skill store: browse, select, install and update skills.

use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;

use myhome_domain::error::MyHomeError;
use myhome_domain::skill::{InstallStatus, SkillAction, SkillRef, StoreSkill};

use crate::polling::{Probe, RetryPolicy, poll_until};
use crate::ports::SkillGateway;

/// First status check 10s after the install request, then every 5s.
pub const INSTALL_POLICY: RetryPolicy =
    RetryPolicy::new(Duration::from_secs(10), Duration::from_secs(5), 120);

/// First status check 12s after the update request, then every 5s.
pub const UPDATE_POLICY: RetryPolicy =
    RetryPolicy::new(Duration::from_secs(12), Duration::from_secs(5), 120);

/// Final state of an install or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Updated,
    Failed,
    TimedOut,
}

pub struct SkillStore<G> {
    gateway: G,
    cart: Vec<SkillRef>,
    install_policy: RetryPolicy,
    update_policy: RetryPolicy,
}

impl<G: SkillGateway> SkillStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            cart: Vec::new(),
            install_policy: INSTALL_POLICY,
            update_policy: UPDATE_POLICY,
        }
    }

    /// Override the install and update polling policies.
    #[must_use]
    pub fn with_policies(mut self, install: RetryPolicy, update: RetryPolicy) -> Self {
        self.install_policy = install;
        self.update_policy = update;
        self
    }

    /// Store skills that are not installed yet.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    #[tracing::instrument(skip(self, installed))]
    pub async fn catalog(&self, installed: &[String]) -> Result<Vec<StoreSkill>, MyHomeError> {
        let installed: HashSet<&str> = installed.iter().map(String::as_str).collect();
        let skills = self.gateway.store_catalog().await?;
        Ok(skills
            .into_iter()
            .filter(|skill| !installed.contains(skill.name.as_str()))
            .collect())
    }

    /// Add or remove a skill from the install cart. Returns whether it is
    /// selected now.
    pub fn toggle_selection(&mut self, skill: &StoreSkill) -> bool {
        let entry = skill.reference();
        if let Some(index) = self.cart.iter().position(|selected| *selected == entry) {
            self.cart.remove(index);
            false
        } else {
            self.cart.push(entry);
            true
        }
    }

    #[must_use]
    pub fn selection(&self) -> &[SkillRef] {
        &self.cart
    }

    /// Install every selected skill and follow all of them at once until each
    /// is installed or failed. The cart is emptied once the request is
    /// accepted; outcomes keep the cart order.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the install request; per-skill problems
    /// are reported as [`InstallOutcome`]s.
    #[tracing::instrument(skip(self), fields(selected = self.cart.len()))]
    pub async fn install_selected(&mut self) -> Result<Vec<(String, InstallOutcome)>, MyHomeError> {
        if self.cart.is_empty() {
            return Ok(Vec::new());
        }
        self.gateway.install_skills(&self.cart).await?;
        let cart = std::mem::take(&mut self.cart);
        let this = &*self;
        let follow_ups = cart.iter().map(|entry| async move {
            let outcome = this
                .follow(&entry.skill, InstallStatus::Installed, &this.install_policy)
                .await;
            tracing::info!(skill = %entry.skill, ?outcome, "install finished");
            outcome
        });
        let outcomes = join_all(follow_ups).await;
        Ok(cart
            .into_iter()
            .map(|entry| entry.skill)
            .zip(outcomes)
            .collect())
    }

    /// Update a skill and follow it until it is updated or failed.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the update request.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, skill: &str) -> Result<InstallOutcome, MyHomeError> {
        self.gateway.skill_action(SkillAction::Update, skill).await?;
        Ok(self
            .follow(skill, InstallStatus::Updated, &self.update_policy)
            .await)
    }

    /// Enable or disable a skill.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn toggle(&self, skill: &str) -> Result<(), MyHomeError> {
        self.gateway.skill_action(SkillAction::Toggle, skill).await
    }

    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn delete(&self, skill: &str) -> Result<(), MyHomeError> {
        self.gateway.skill_action(SkillAction::Delete, skill).await
    }

    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn reload(&self, skill: &str) -> Result<(), MyHomeError> {
        self.gateway.skill_action(SkillAction::Reload, skill).await
    }

    /// Poll the install status until `target`, a failure, or the policy runs
    /// out. A status request that fails counts as a failed install.
    async fn follow(&self, skill: &str, target: InstallStatus, policy: &RetryPolicy) -> InstallOutcome {
        let gateway = &self.gateway;
        let target = &target;
        let result = poll_until(policy, |_| async move {
            let status = match gateway.install_status(skill).await {
                Ok(status) => status,
                Err(err) => {
                    tracing::debug!(error = %err, "install status unavailable");
                    InstallStatus::Failed
                }
            };
            Ok(if status == *target {
                Probe::Ready(true)
            } else if status.is_failure() {
                Probe::Ready(false)
            } else {
                Probe::Pending
            })
        })
        .await;
        match (result, target) {
            (Ok(true), InstallStatus::Updated) => InstallOutcome::Updated,
            (Ok(true), _) => InstallOutcome::Installed,
            (Ok(false), _) => InstallOutcome::Failed,
            (Err(_), _) => InstallOutcome::TimedOut,
        }
    }
}
