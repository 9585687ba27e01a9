//! Streaming `COPY FROM STDIN` of one partition file.

use crate::ddl::{generate_copy, SET_DATESTYLE};
use crate::error::PostgreSQLBackendError;
use bytes::Bytes;
use futures::{pin_mut, SinkExt, StreamExt};
use std::path::Path;
use tokio_postgres::Client;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Size of the chunks sent to the server while copying.
pub const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// Copy the file at `path` into `table` inside a single transaction.
///
/// Returns the number of rows the server reports as copied.
pub(crate) async fn copy_file(
    client: &mut Client,
    table: &str,
    path: &Path,
) -> Result<u64, PostgreSQLBackendError> {
    let file = tokio::fs::File::open(path).await?;
    let mut chunks = ReaderStream::with_capacity(file, COPY_CHUNK_SIZE);

    let transaction = client.transaction().await?;
    transaction.batch_execute(SET_DATESTYLE).await?;

    let statement = generate_copy(table);
    debug!("{statement} <- {}", path.display());
    let sink = transaction.copy_in::<_, Bytes>(statement.as_str()).await?;
    pin_mut!(sink);

    while let Some(chunk) = chunks.next().await {
        sink.send(chunk?).await?;
    }
    let rows = sink.finish().await?;

    transaction.commit().await?;
    Ok(rows)
}
