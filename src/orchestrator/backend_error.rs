/// Outcome of a submission the orchestration backend didn't accept.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    /// Backend was reached and refused the job, e.g. because a job with the same name exists.
    #[error("Backend rejected the job ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// Backend couldn't be reached or isn't able to process requests right now.
    #[error("Backend is unavailable: {0:#}")]
    Unavailable(anyhow::Error),
}
