use chrono::{DateTime, FixedOffset, Utc};

use crate::context::BuildContext;
use crate::predicate::model::{BuildMetadata, Builder, RunDetails};

impl RunDetails {
    /// Builder identity plus session timing, normalized to UTC.
    pub fn assemble(builder_id: &str, ctx: &BuildContext) -> Self {
        RunDetails {
            builder: Builder {
                id: builder_id.to_string(),
            },
            metadata: BuildMetadata {
                started_on: to_utc(&ctx.started_on),
                finished_on: ctx.finished_on.as_ref().map(to_utc),
                invocation_id: ctx.invocation_id.clone().filter(|id| !id.is_empty()),
            },
        }
    }
}

/// Re-express an instant recorded in any zone as UTC.
pub fn to_utc(instant: &DateTime<FixedOffset>) -> DateTime<Utc> {
    instant.with_timezone(&Utc)
}
