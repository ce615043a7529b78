//! Package body streaming.

use std::fmt::Display;
use std::time::Duration;

use apkfetch_core::ports::{PackageStream, StoreClientError};
use bytes::Bytes;
use futures_util::{Stream, StreamExt, stream};

/// Wrap an HTTP body as a [`PackageStream`].
///
/// Body errors become `TransferInterrupted`, as does a gap of more than
/// `idle_timeout` between chunks. When the response announced a length, a
/// body that ends short of it is also `TransferInterrupted`. The stream ends
/// after the first error.
pub fn package_stream<S, E>(
    body: S,
    expected_len: Option<u64>,
    idle_timeout: Duration,
) -> PackageStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = (Box::pin(body), 0_u64, false);
    Box::pin(stream::unfold(
        state,
        move |(mut body, received, finished)| async move {
            if finished {
                return None;
            }
            let Ok(next) = tokio::time::timeout(idle_timeout, body.next()).await else {
                return Some((
                    Err(StoreClientError::transfer_interrupted(format!(
                        "no data for {}ms after {received} bytes",
                        idle_timeout.as_millis()
                    ))),
                    (body, received, true),
                ));
            };
            match next {
                Some(Ok(chunk)) => {
                    let received = received + chunk.len() as u64;
                    Some((Ok(chunk), (body, received, false)))
                }
                Some(Err(e)) => Some((
                    Err(StoreClientError::transfer_interrupted(e.to_string())),
                    (body, received, true),
                )),
                None => match expected_len {
                    Some(expected) if received < expected => Some((
                        Err(StoreClientError::transfer_interrupted(format!(
                            "body ended after {received} of {expected} bytes"
                        ))),
                        (body, received, true),
                    )),
                    _ => None,
                },
            }
        },
    ))
}
