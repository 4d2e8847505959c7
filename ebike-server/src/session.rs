//! Fetch-cycle orchestration.
//!
//! A [`Controller`] owns the feed client, the map presenter, the shared
//! page model and the refresh countdown, and runs the fetch → aggregate →
//! render pipeline: once immediately at startup, then every time the
//! countdown fires. Cycles are serialized on the run loop: the tick loop
//! awaits the cycle in flight, so a slow fetch stalls the countdown
//! display rather than overlapping cycles.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::domain::Coordinate;
use crate::gbfs::StationFeed;
use crate::nearby;
use crate::presenter::{MapPresenter, SceneStore, SummaryLine};
use crate::scheduler::{Countdown, Tick};

/// Search radius when none is configured, kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 0.5;

/// Seconds between fetch cycles when none is configured.
pub const DEFAULT_REFRESH_SECS: u32 = 60;

/// One user's visit: a position fixed at activation and a search radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    pub user: Coordinate,
    pub radius_km: f64,
}

impl Session {
    pub fn new(user: Coordinate, radius_km: f64) -> Self {
        Session { user, radius_km }
    }
}

/// Drives fetch cycles for one session.
pub struct Controller<F, P> {
    feed: F,
    presenter: P,
    store: SceneStore,
    session: Session,
    countdown: Countdown,
}

impl<F: StationFeed, P: MapPresenter> Controller<F, P> {
    /// A controller refreshing every [`DEFAULT_REFRESH_SECS`].
    pub fn new(feed: F, presenter: P, store: SceneStore, session: Session) -> Self {
        Controller {
            feed,
            presenter,
            store,
            session,
            countdown: Countdown::new(DEFAULT_REFRESH_SECS),
        }
    }

    /// Override the refresh period.
    pub fn with_refresh_period(mut self, secs: u32) -> Self {
        self.countdown = Countdown::new(secs);
        self
    }

    /// Run one full fetch cycle: fetch both feeds, aggregate around the
    /// session position, publish the scene and the summary line.
    ///
    /// On failure the summary line switches to the generic error text and
    /// the previously published scene is left as it was.
    pub async fn run_cycle(&mut self) {
        self.store.set_summary(SummaryLine::loading());

        match self.feed.fetch_stations().await {
            Ok(snapshot) => {
                let summary = nearby::aggregate(
                    &snapshot.stations,
                    &snapshot.statuses,
                    self.session.user,
                    self.session.radius_km,
                );
                tracing::info!(
                    nearby = summary.stations.len(),
                    electric = summary.total_electric,
                    regular = summary.total_regular,
                    "fetch cycle complete"
                );
                self.presenter.render(&summary.stations, self.session.user);
                self.store.set_summary(SummaryLine::ready(
                    summary.total_electric,
                    summary.total_regular,
                    self.session.radius_km,
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetch cycle failed");
                self.store.set_summary(SummaryLine::fetch_error());
            }
        }
    }

    /// Run the refresh loop forever: an immediate first cycle, then one
    /// countdown tick per second, with a full cycle whenever the countdown
    /// fires. Intended to be spawned as a background task.
    pub async fn run(mut self) {
        self.run_cycle().await;

        let mut ticks = tokio::time::interval(Duration::from_secs(1));
        // Ticks missed while a cycle runs are dropped, not bunched
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticks.tick().await; // First tick is immediate, skip it

        loop {
            ticks.tick().await;
            if self.countdown.tick() == Tick::Refresh {
                self.run_cycle().await;
            }
            self.store.set_countdown(self.countdown.remaining());
        }
    }
}
