use core::time::Duration;

/// A trait that abstracts over how to pause between directory requests.
///
/// This keeps the pipeline independent of any particular async runtime.
pub trait SleepProvider {
    /// We require `Send` so that the future can be safely moved across threads
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the provider used by the export binary.
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub struct TokioSleep;

#[cfg(feature = "async-tokio")]
impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// A [`SleepProvider`] that returns immediately.
///
/// Useful in tests and when exporting from a local mirror that needs no
/// rate limiting.
pub struct NoSleep;

impl SleepProvider for NoSleep {
    async fn sleep_for(_dur: Duration) {}
}
