use crate::{
    error::Error as CampaignerError, orchestrator::JobsBackend, scheduler::CronExt,
    server::AppState,
};
use actix_web::{HttpResponse, web};
use croner::Cron;
use serde_derive::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, TimestampSeconds, serde_as};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::error;

#[derive(Deserialize)]
pub struct SchedulerParseScheduleParams {
    pub schedule: String,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerParseScheduleResult {
    /// The minimum interval between two consequent campaign firings.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub min_interval: Duration,
    /// The next 5 occurrences of the provided schedule.
    #[serde_as(as = "Vec<TimestampSeconds<i64>>")]
    pub next_occurrences: Vec<OffsetDateTime>,
}

/// Parses the provided schedule and returns the minimum interval between occurrences and the next
/// 5 occurrences.
pub async fn scheduler_parse_schedule<JB: JobsBackend>(
    state: web::Data<AppState<JB>>,
    body_params: web::Json<SchedulerParseScheduleParams>,
) -> Result<HttpResponse, CampaignerError> {
    let schedule = match Cron::parse_pattern(&body_params.schedule) {
        Ok(schedule) => schedule,
        Err(err) => {
            error!(schedule = %body_params.schedule, "Failed to parse schedule: {err}");
            return Err(CampaignerError::validation(format!(
                "Schedule `{}` is not a valid cron expression: {err}",
                body_params.schedule
            )));
        }
    };

    let min_schedule_interval = state.config.campaigns.min_schedule_interval;
    let min_interval = schedule.min_interval()?;
    if min_interval < min_schedule_interval {
        return Err(CampaignerError::validation(format!(
            "The minimum interval between occurrences should be greater than {}, but got {}",
            humantime::format_duration(min_schedule_interval),
            humantime::format_duration(min_interval)
        )));
    }

    Ok(HttpResponse::Ok().json(SchedulerParseScheduleResult {
        min_interval,
        next_occurrences: schedule
            .next_occurrences(5)
            .into_iter()
            .map(|ts| OffsetDateTime::from_unix_timestamp(ts.timestamp()))
            .collect::<Result<_, _>>()
            .map_err(anyhow::Error::from)?,
    }))
}
