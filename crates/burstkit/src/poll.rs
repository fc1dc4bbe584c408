//! Change-detecting mining-info poller.
//!
//! Turns the point-in-time `getMiningInfo` operation into a stream that
//! emits only when the node's mining state actually advances. A single
//! sequential task owns the poll loop and its last-seen snapshot, so ticks
//! are strictly serialized and results arrive in issue order.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::api::BurstNodeService;
use crate::entity::MiningInfo;
use crate::error::ClientError;

/// Default spacing between polls, matching the node's block-race granularity.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// What the poller does when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFetchError {
    /// Forward the error downstream and stop the stream. Callers needing
    /// resilience resubscribe.
    #[default]
    Terminate,
    /// Log the failure and keep the cadence; nothing is emitted for the tick.
    Skip,
}

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Poll period. Must be non-zero; the first poll fires immediately.
    pub period: Duration,
    pub on_fetch_error: OnFetchError,
    /// Runtime to spawn the poll task on. Defaults to the ambient runtime,
    /// which callers off the runtime (GUI threads, test harnesses) override.
    pub runtime: Option<tokio::runtime::Handle>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            on_fetch_error: OnFetchError::default(),
            runtime: None,
        }
    }
}

/// A live mining-info subscription.
///
/// Yields `Ok` snapshots on change, and — under
/// [`OnFetchError::Terminate`] — a final `Err` before the stream ends.
/// Dropping the subscription stops the poll task.
pub struct MiningInfoSubscription {
    rx: mpsc::Receiver<Result<MiningInfo, ClientError>>,
    task: JoinHandle<()>,
}

impl MiningInfoSubscription {
    /// Receive the next emission, or `None` once the stream is finished.
    pub async fn recv(&mut self) -> Option<Result<MiningInfo, ClientError>> {
        self.rx.recv().await
    }

    /// Stop polling. Idempotent, and immediate from the consumer's view:
    /// nothing is delivered after this returns. An in-flight fetch is left
    /// to finish on its own; its result is discarded.
    pub fn cancel(&mut self) {
        self.task.abort();
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}

impl Stream for MiningInfoSubscription {
    type Item = Result<MiningInfo, ClientError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for MiningInfoSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Subscribe to mining-info changes on a node service.
pub fn subscribe<S>(service: Arc<S>, options: PollOptions) -> MiningInfoSubscription
where
    S: BurstNodeService + ?Sized + 'static,
{
    subscribe_with(
        move || {
            let service = Arc::clone(&service);
            async move { service.get_mining_info().await }
        },
        options,
    )
}

/// Subscribe using an arbitrary fetch function.
///
/// The fetch is awaited to completion before the next tick is scheduled, so
/// emissions can never be reordered even when round-trip times vary.
pub fn subscribe_with<F, Fut>(mut fetch: F, options: PollOptions) -> MiningInfoSubscription
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<MiningInfo, ClientError>> + Send,
{
    let PollOptions {
        period,
        on_fetch_error,
        runtime,
    } = options;
    let (tx, rx) = mpsc::channel(16);

    let run = async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last: Option<MiningInfo> = None;

        loop {
            ticker.tick().await;
            match fetch().await {
                Ok(info) => {
                    let is_new = last.as_ref().map_or(true, |prev| info.changed_from(prev));
                    if is_new {
                        last = Some(info.clone());
                        if tx.send(Ok(info)).await.is_err() {
                            break;
                        }
                    }
                }
                Err(err) => match on_fetch_error {
                    OnFetchError::Terminate => {
                        let _ = tx.send(Err(err)).await;
                        break;
                    }
                    OnFetchError::Skip => {
                        warn!(error = %err, "mining info fetch failed; keeping cadence");
                    }
                },
            }
        }
    };

    let task = match runtime {
        Some(handle) => handle.spawn(run),
        None => tokio::spawn(run),
    };

    MiningInfoSubscription { rx, task }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use futures::StreamExt;

    use super::*;
    use crate::api::mock::ScriptedNodeService;
    use crate::value::HexData;

    fn info(sig: &[u8], height: u64) -> MiningInfo {
        MiningInfo {
            generation_signature: HexData(sig.to_vec()),
            base_target: 70_000,
            height,
        }
    }

    /// A fetch function that replays `results` and then fails every call.
    fn scripted(
        results: Vec<Result<MiningInfo, ClientError>>,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<MiningInfo, ClientError>> + Send>>
           + Send
           + 'static {
        let script = Arc::new(Mutex::new(VecDeque::from(results)));
        move || {
            let script = Arc::clone(&script);
            Box::pin(async move {
                script
                    .lock()
                    .expect("script lock")
                    .pop_front()
                    .unwrap_or_else(|| Err(ClientError::InvalidResponse("script exhausted".into())))
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_snapshots_are_suppressed() {
        let fetch = scripted(vec![
            Ok(info(b"a", 10)),
            Ok(info(b"a", 10)),
            Ok(info(b"b", 10)),
            Ok(info(b"b", 11)),
        ]);
        let mut sub = subscribe_with(fetch, PollOptions::default());

        let first = sub.recv().await.expect("stream open").expect("first fetch emits");
        assert_eq!((first.generation_signature.as_bytes(), first.height), (&b"a"[..], 10));

        let second = sub.recv().await.expect("stream open").expect("signature change emits");
        assert_eq!((second.generation_signature.as_bytes(), second.height), (&b"b"[..], 10));

        let third = sub.recv().await.expect("stream open").expect("height change emits");
        assert_eq!((third.generation_signature.as_bytes(), third.height), (&b"b"[..], 11));

        // Script exhaustion fails the next tick, which terminates the stream.
        assert!(matches!(sub.recv().await, Some(Err(_))));
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn first_fetch_emits_without_waiting_a_period() {
        let start = tokio::time::Instant::now();
        let mut sub = subscribe_with(scripted(vec![Ok(info(b"a", 10))]), PollOptions::default());
        sub.recv().await.expect("stream open").expect("should emit");
        assert!(start.elapsed() < DEFAULT_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn terminate_policy_forwards_the_error_and_ends() {
        let fetch = scripted(vec![Err(ClientError::InvalidResponse("boom".into()))]);
        let mut sub = subscribe_with(fetch, PollOptions::default());
        assert!(matches!(sub.recv().await, Some(Err(ClientError::InvalidResponse(_)))));
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn skip_policy_keeps_polling_after_a_failed_fetch() {
        let fetch = scripted(vec![
            Err(ClientError::InvalidResponse("boom".into())),
            Ok(info(b"a", 10)),
        ]);
        let options = PollOptions {
            on_fetch_error: OnFetchError::Skip,
            ..PollOptions::default()
        };
        let mut sub = subscribe_with(fetch, options);

        let first = sub.recv().await.expect("stream open").expect("emission after skip");
        assert_eq!(first.height, 10);
        sub.cancel();
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent_and_immediate() {
        let mut sub = subscribe_with(
            scripted(vec![Ok(info(b"a", 10)), Ok(info(b"b", 11))]),
            PollOptions::default(),
        );
        sub.recv().await.expect("stream open").expect("first emission");
        sub.cancel();
        sub.cancel();
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn subscription_is_a_stream() {
        let service = Arc::new(ScriptedNodeService::with_mining_info(vec![Ok(info(b"a", 10))]));
        let mut sub = subscribe(service, PollOptions::default());
        let first = sub.next().await.expect("stream open").expect("should emit");
        assert_eq!(first.height, 10);
    }
}
