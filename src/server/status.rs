mod status_level;

pub use self::status_level::StatusLevel;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Status {
    pub version: String,
    pub level: StatusLevel,
}
