use crate::{
    api::Api,
    config::Config,
    orchestrator::{JobsBackend, KubernetesBackend},
    server::status::{Status, StatusLevel},
};
use std::sync::RwLock;

pub struct AppState<JB: JobsBackend = KubernetesBackend> {
    pub config: Config,
    pub status: RwLock<Status>,
    pub api: Api<JB>,
}

impl<JB: JobsBackend> AppState<JB> {
    pub fn new(config: Config, api: Api<JB>) -> Self {
        let version = config.version.clone();
        Self {
            config,
            status: RwLock::new(Status {
                version,
                level: StatusLevel::Available,
            }),
            api,
        }
    }
}
