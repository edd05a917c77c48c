use crate::coordinator::Coordinator;
use chrono::{DateTime, Days, Local, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use std::time::Duration;
use tokio::task::JoinHandle;

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);
const GAP_STEP_MINUTES: i64 = 15;

/// Midnight starting the calendar day after `now`.
pub fn next_midnight_after(now: NaiveDateTime) -> Option<NaiveDateTime> {
    now.date()
        .checked_add_days(Days::new(1))
        .map(|day| day.and_time(NaiveTime::MIN))
}

/// Time left until the next local midnight in `now`'s zone.
///
/// When that midnight falls in a DST gap, the target is the first local
/// time after it that exists, so the wake-up still lands on the new day.
pub fn delay_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let Some(midnight) = next_midnight_after(now.naive_local()) else {
        return ONE_DAY;
    };
    let zone = now.timezone();
    let target = (0..24 * 60 / GAP_STEP_MINUTES)
        .filter_map(|step| midnight.checked_add_signed(TimeDelta::minutes(step * GAP_STEP_MINUTES)))
        .find_map(|local| zone.from_local_datetime(&local).earliest());
    match target {
        Some(target) => target
            .signed_duration_since(now.clone())
            .to_std()
            .unwrap_or(ONE_DAY),
        None => ONE_DAY,
    }
}

/// Refresh immediately, then once per local midnight, forever.
pub fn spawn_daily_refresh(coordinator: Coordinator) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_day = coordinator.refresh().date;
        loop {
            let delay = delay_until_next_midnight(&Local::now());
            tracing::debug!(seconds = delay.as_secs(), "next scheduled refresh");
            tokio::time::sleep(delay).await;

            let now = Local::now().naive_local();
            if now.date() <= last_day {
                // woke before the day rolled over
                continue;
            }
            tracing::info!(%now, "daily scheduled refresh triggered");
            last_day = coordinator.refresh_at(now).date;
        }
    })
}
