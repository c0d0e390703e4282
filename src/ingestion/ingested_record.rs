use time::OffsetDateTime;

/// Single record collected from the external source API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedRecord {
    /// Identifier of the record in the external source, unique across all handles.
    pub external_id: i64,
    /// Source handle the record was collected for.
    pub handle: String,
    /// Text of the record.
    pub text: String,
    /// Time the record was created at in the external source, if reported.
    pub created_at: Option<OffsetDateTime>,
}
