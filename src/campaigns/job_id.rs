use anyhow::{anyhow, bail};
use hex::ToHex;
use serde::Serialize;
use std::{
    fmt::{Display, Formatter},
    ops::Deref,
};

/// Number of random bytes in the job ID suffix (6 hex characters, 16,777,216 combinations).
const JOB_ID_SUFFIX_LENGTH_BYTES: usize = 3;

/// Unique name of the recurring job registered for a campaign: `<campaign name>-<6 hex chars>`.
/// Uniqueness is probabilistic, existing jobs are never queried during allocation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Allocates a new job ID for the campaign with the specified name.
    pub fn allocate(name: &str) -> anyhow::Result<Self> {
        let mut suffix = [0u8; JOB_ID_SUFFIX_LENGTH_BYTES];
        getrandom::fill(&mut suffix)
            .map_err(|err| anyhow!("Failed to generate job ID suffix: {err}"))?;
        Self::with_suffix(name, suffix)
    }

    /// Builds job ID for the campaign with the specified name from the given random bytes.
    pub fn with_suffix(name: &str, suffix: [u8; JOB_ID_SUFFIX_LENGTH_BYTES]) -> anyhow::Result<Self> {
        if name.is_empty() {
            bail!("Campaign name cannot be empty.");
        }

        Ok(Self(format!("{name}-{}", suffix.encode_hex::<String>())))
    }
}

impl Deref for JobId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
