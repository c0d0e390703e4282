/// Describes a Campaigner specific error types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing request fields, invalid schedule or non-encodable payload.
    Validation,
    /// The orchestration backend explicitly rejected the compiled job.
    SubmissionRejected,
    /// The orchestration backend couldn't be reached or timed out.
    BackendUnavailable,
    /// Unknown error.
    Unknown,
}
