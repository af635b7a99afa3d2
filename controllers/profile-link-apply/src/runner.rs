//! Drives the trusted profile link resource through its lifecycle.
//!
//! Each command loads recorded state, runs one or more adapter operations and
//! writes the resulting state back, even when an operation failed part-way.

use crate::error::RunnerError;
use crate::state::{load_config, load_state, save_state};
use iam_identity_client::IamIdentityClientTrait;
use profile_link::{
    plan, ClientSession, Diagnostics, LinkId, PlanAction, ResourceData, TrustedProfileLinkResource,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Lifecycle runner bound to one state file
pub struct Runner {
    session: Arc<dyn ClientSession>,
    resource: TrustedProfileLinkResource,
    state_path: PathBuf,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("state_path", &self.state_path)
            .finish_non_exhaustive()
    }
}

impl Runner {
    /// Runner persisting state to `state_path`
    pub fn new(session: Arc<dyn ClientSession>, state_path: impl Into<PathBuf>) -> Self {
        Self {
            resource: TrustedProfileLinkResource::new(Arc::clone(&session)),
            session,
            state_path: state_path.into(),
        }
    }

    /// Bring the recorded link in line with the configuration file.
    pub async fn apply(&self, config_path: &Path) -> Result<PlanAction, RunnerError> {
        let mut desired = ResourceData::from_config(self.resource.schema(), load_config(config_path)?)?;
        let mut prior = self.load()?;

        let refreshed = self.resource.read(&mut prior).await;
        self.finish(&prior, refreshed)?;

        let action = plan(&prior, &desired);
        match &action {
            PlanAction::NoOp => {
                info!("Trusted profile link {} is up to date", prior.id());
            }
            PlanAction::Create => {
                info!("Creating trusted profile link");
                let created = self.resource.create(&mut desired).await;
                self.finish(&desired, created)?;
            }
            PlanAction::Replace { attributes } => {
                info!(
                    "Replacing trusted profile link {} (changed: {})",
                    prior.id(),
                    attributes.join(", ")
                );
                let deleted = self.resource.delete(&mut prior).await;
                self.finish(&prior, deleted)?;
                let created = self.resource.create(&mut desired).await;
                self.finish(&desired, created)?;
            }
        }
        Ok(action)
    }

    /// Re-read the recorded link; a vanished link leaves an empty state.
    pub async fn refresh(&self) -> Result<(), RunnerError> {
        let mut data = self.load()?;
        if data.id().is_empty() {
            info!("No trusted profile link recorded in {}", self.state_path.display());
        }
        let result = self.resource.read(&mut data).await;
        self.finish(&data, result)
    }

    /// Adopt an existing link given as `<profile_id>/<link_id>`.
    pub async fn import(&self, id: &str) -> Result<(), RunnerError> {
        let link_id = LinkId::parse(id)?;
        let recorded = self.load()?;
        if !recorded.id().is_empty() {
            return Err(RunnerError::AlreadyManaged {
                id: recorded.id().to_string(),
            });
        }
        let mut data = self.resource.import(id)?;

        let client = self.session.iam_identity_api()?;
        let links = client
            .list_links(&link_id.profile_id)
            .await
            .map_err(|source| RunnerError::ListLinks {
                profile_id: link_id.profile_id.clone(),
                source,
            })?;
        if !links.iter().any(|link| link.id == link_id.link_id) {
            return Err(RunnerError::LinkNotFound {
                profile_id: link_id.profile_id,
                link_id: link_id.link_id,
            });
        }

        info!("Importing trusted profile link {}", link_id);
        let result = self.resource.read(&mut data).await;
        self.finish(&data, result)
    }

    /// Delete the recorded link, if any. The link is refreshed first so one
    /// removed out of band only clears the state.
    pub async fn destroy(&self) -> Result<(), RunnerError> {
        let mut data = self.load()?;
        let refreshed = self.resource.read(&mut data).await;
        self.finish(&data, refreshed)?;
        if data.id().is_empty() {
            info!("No trusted profile link recorded, nothing to destroy");
            return self.finish(&ResourceData::new(self.resource.schema()), Ok(()));
        }
        let result = self.resource.delete(&mut data).await;
        if data.id().is_empty() {
            data = ResourceData::new(self.resource.schema());
        }
        self.finish(&data, result)
    }

    fn load(&self) -> Result<ResourceData, RunnerError> {
        let state = load_state(&self.state_path)?;
        Ok(ResourceData::from_state(self.resource.schema(), state)?)
    }

    /// Persist `data`, then report the operation result.
    fn finish(&self, data: &ResourceData, result: Result<(), Diagnostics>) -> Result<(), RunnerError> {
        save_state(&self.state_path, &data.to_state())?;
        result.map_err(|diags| {
            for diag in diags.iter() {
                error!("{}", diag);
            }
            RunnerError::Diagnostics(diags)
        })
    }
}
