/// Reference to the orchestrator-managed secret key that holds the delivery credential. The fired
/// job resolves it from its own environment at execution time, so the credential value never
/// appears in the job command or in the stored job object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRef {
    /// Name of the secret object.
    pub name: String,
    /// Key inside the secret object.
    pub key: String,
}
