use super::{Browser, BrowserError, By, PageElement};
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Polls `probe` until it yields a value or `timeout` expires.
///
/// `probe` returns `Ok(Some(_))` when the condition holds, `Ok(None)` when it
/// does not hold yet, and `Err(_)` to abort the wait immediately. The probe is
/// always evaluated at least once, even with a zero timeout.
pub async fn wait_until<T, F, Fut>(
    what: &str,
    timeout: Duration,
    poll_interval: Duration,
    mut probe: F,
) -> Result<T, BrowserError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, BrowserError>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }

        let now = Instant::now();
        if now >= deadline {
            ::log::debug!("Gave up waiting for {} after {:?}", what, timeout);
            return Err(BrowserError::WaitTimeout {
                what: what.to_string(),
                timeout,
            });
        }

        ::log::trace!("Still waiting for {}", what);
        sleep(poll_interval.min(deadline - now)).await;
    }
}

/// Waits for an element matching `by` to be present on the page.
pub async fn wait_for_element(
    browser: &dyn Browser,
    by: &By,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Box<dyn PageElement>, BrowserError> {
    let what = by.to_string();
    wait_until(&what, timeout, poll_interval, move || async move {
        match browser.find(by).await {
            Ok(element) => Ok(Some(element)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    })
    .await
}
