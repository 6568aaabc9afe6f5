use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::campaign::store::CampaignStore;
use crate::config::{Config, Thresholds};
use crate::error::Error;
use crate::project::state::ProjectState;
use crate::seed;
use crate::settings::WorkspaceSettings;
use crate::team::Team;
use crate::user::auth::AuthState;

/// All mutable state of one running dashboard. Nothing here outlives the
/// process.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub thresholds: Thresholds,
    pub auth: AuthState,
    pub projects: ProjectState,
    pub campaigns: CampaignStore,
    pub settings: WorkspaceSettings,
    pub team: Team,
}

impl Dashboard {
    /// A dashboard over the mock data set.
    pub fn seeded(config: &Config) -> Dashboard {
        let mut auth = AuthState::new(seed::users());
        if config.auto_login {
            if let Some(admin) = auth.roster().first().cloned() {
                auth.login(admin);
            }
        }

        Dashboard {
            thresholds: config.thresholds,
            auth,
            projects: ProjectState::new(seed::projects()),
            campaigns: CampaignStore::from_campaigns(seed::campaigns()),
            settings: WorkspaceSettings::default(),
            team: Team::new(seed::team_members()),
        }
    }
}

type Job = Box<dyn FnOnce(&mut Dashboard) + Send>;

/// Cheap, cloneable access to the task that owns the [`Dashboard`]. Jobs run
/// one at a time in the order they were sent.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::UnboundedSender<Job>,
}

/// Moves `dashboard` into its own task. Must be called from within a tokio
/// runtime.
pub fn spawn(dashboard: Dashboard) -> SessionHandle {
    let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

    tokio::spawn(async move {
        let mut dashboard = dashboard;
        while let Some(job) = receiver.recv().await {
            job(&mut dashboard);
        }
        debug!("session closed");
    });

    SessionHandle { sender }
}

impl SessionHandle {
    pub async fn run<F, R>(&self, f: F) -> Result<R, Error>
    where
        F: FnOnce(&mut Dashboard) -> Result<R, Error> + Send + 'static,
        R: Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let job: Job = Box::new(move |dashboard| {
            // the caller may have gone away, nothing to do then
            let _ = reply.send(f(dashboard));
        });

        self.sender
            .send(job)
            .map_err(|_| Error::SessionUnavailable)?;

        response.await.map_err(|_| Error::SessionUnavailable)?
    }
}
