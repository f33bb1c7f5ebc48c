//! Async driver that feeds a chunk stream into a parser.

use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use super::{ExtractionSink, StreamParser};
use crate::error::{StreamError, StreamResult};

/// Drive `chunks` to completion through `parser`.
///
/// Chunks are processed strictly in order. Cancellation is honored only
/// between chunks: a chunk already handed to the parser is always processed
/// to completion. On normal end-of-stream the parser is flushed so a final
/// unterminated line is not lost; on transport error or cancellation no
/// flush happens and the partial state is whatever the parser saw.
pub async fn drive<S, St, E>(
    parser: &mut StreamParser<S>,
    chunks: St,
    cancel: CancellationToken,
) -> StreamResult<()>
where
    S: ExtractionSink,
    St: Stream<Item = Result<String, E>>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    futures::pin_mut!(chunks);

    loop {
        if cancel.is_cancelled() {
            return Err(StreamError::Cancelled);
        }

        let next = tokio::select! {
            _ = cancel.cancelled() => return Err(StreamError::Cancelled),
            next = chunks.next() => next,
        };

        match next {
            Some(Ok(chunk)) => parser.process_chunk(&chunk),
            Some(Err(err)) => return Err(StreamError::Transport(err.into())),
            None => break,
        }
    }

    parser.flush();
    Ok(())
}
