use crate::{
    campaigns::JobCompiler, config::Config, orchestrator::JobsBackend, scheduler::CronExt,
};
use anyhow::Context;
use croner::Cron;

/// Collection of APIs the campaign service is built from.
pub struct Api<JB: JobsBackend> {
    pub config: Config,
    pub jobs_backend: JB,
    pub compiler: JobCompiler,
}

impl<JB: JobsBackend> Api<JB> {
    /// Instantiates APIs collection with the specified config and jobs backend. Fails if the
    /// delivery credential isn't configured or the default campaign schedule is invalid.
    pub fn new(config: Config, jobs_backend: JB) -> anyhow::Result<Self> {
        let secret_ref = config.delivery.secret_ref()?;
        Cron::parse_pattern(&config.campaigns.default_schedule).with_context(|| {
            format!(
                "Default campaign schedule (`{}`) is not valid.",
                config.campaigns.default_schedule
            )
        })?;

        Ok(Self {
            compiler: JobCompiler::new(config.delivery.image.clone(), secret_ref),
            config,
            jobs_backend,
        })
    }
}
