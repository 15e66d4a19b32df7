use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

/// Runs `f` on every tick of `period` until it breaks.
///
/// The first tick completes immediately. A run that overshoots the period
/// swallows the ticks it missed instead of firing them back to back.
pub async fn every<T, F, Fut>(period: Duration, mut f: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ControlFlow<T>>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        if let ControlFlow::Break(ret) = f().await {
            break ret;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stops_on_break() {
        let mut runs = 0;
        let ret = every(Duration::from_secs(30), || {
            runs += 1;
            let current = runs;
            async move {
                if current == 3 {
                    ControlFlow::Break(current)
                } else {
                    ControlFlow::Continue(())
                }
            }
        })
        .await;
        assert_eq!(ret, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn first_run_is_immediate() {
        let start = tokio::time::Instant::now();
        every(Duration::from_secs(60), || async { ControlFlow::Break(()) }).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
