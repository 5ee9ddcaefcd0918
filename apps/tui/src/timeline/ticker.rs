use crate::timeline::ChartId;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Timer message. Only ticks whose generation matches the synchronizer's
/// current generation are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub chart: ChartId,
    pub generation: u64,
}

/// Repeating timer task. Dropping it cancels the task.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Sends a [`Tick`] every `period`, first one after a full period.
    pub fn spawn(
        chart: ChartId,
        generation: u64,
        period: Duration,
        ticks: UnboundedSender<Tick>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(Tick { chart, generation }).is_err() {
                    break;
                }
            }
        });

        Self { generation, handle }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn ticks_arrive_once_per_period() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let _ticker = Ticker::spawn(ChartId::RacingBars, 3, Duration::from_millis(2000), tx);

        let first = timeout(Duration::from_secs(5), rx.recv()).await?;
        assert_eq!(
            first,
            Some(Tick {
                chart: ChartId::RacingBars,
                generation: 3
            })
        );
        assert!(start.elapsed() >= Duration::from_millis(2000));

        timeout(Duration::from_secs(5), rx.recv()).await?;
        assert!(start.elapsed() >= Duration::from_millis(4000));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_ticker_stops_sending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(ChartId::LandUse, 1, Duration::from_millis(1500), tx);
        drop(ticker);

        let received = timeout(Duration::from_secs(10), rx.recv()).await;

        // The aborted task drops its sender, closing the channel.
        assert!(matches!(received, Ok(None)));
    }
}
