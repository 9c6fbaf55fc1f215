use std::io::Write;

use serde::Serialize;

use crate::error::ClientResult;

/// One CLI command. Handlers write their result to `out` so that callers
/// decide where it goes.
pub trait Handler {
    fn handle(&mut self, out: &mut dyn Write) -> ClientResult<()>;
}

pub mod endpoints;
pub mod header;
pub mod merge;
pub mod transaction;

pub use endpoints::EndpointsHandler;
pub use header::HeaderHandler;
pub use merge::{MergeHandler, MergeTarget};
pub use transaction::TransactionHandler;

/// Pretty-prints a value as JSON followed by a newline
pub(crate) fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> ClientResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
