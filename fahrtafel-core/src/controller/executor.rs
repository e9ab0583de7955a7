//! The cooperative main loop
//!
//! One controller owns the board and all application state. Every tick it
//! observes the link, maintains the update window, paces reconnects,
//! resyncs the clock at the top of the hour and refreshes the display on
//! its own cadence. All waiting is explicit sleeping; nothing blocks
//! longer than one bounded operation.

use core::fmt::Write;

use heapless::String;

use fahrtafel_display::{compose, draw_status, render, DisplayBackend, DisplayError};
use fahrtafel_feed::{Timetable, MAX_WEATHER_LEN};

use crate::clock::{self, LocalTime};
use crate::config::BoardConfig;
use crate::controller::{Board, IntervalTimer};
use crate::net::ConnectivityManager;
use crate::schedule::{fetch_live, offline_snapshot};
use crate::traits::{
    HttpClient, NetworkInterface, Storage, StorageSlot, SystemClock, SystemControl,
};
use crate::update::UpdateManager;

/// Main loop period
pub const TICK_MS: u32 = 500;

/// Display refresh cadence
pub const DISPLAY_REFRESH_MS: u64 = 30_000;

/// Bounded association rounds at boot before proceeding offline
pub const BOOT_CONNECT_ROUNDS: u32 = 3;

/// Visible countdown before the post-update reboot
pub const REBOOT_COUNTDOWN_S: u32 = 10;

/// Shared response/dataset buffer size.
///
/// Sized for the largest payload in flight (the offline dataset); only one
/// response lives in it at a time.
pub const SCRATCH_BYTES: usize = 12 * 1024;

/// Window within the hour's first minute in which the hourly resync fires
const SYNC_SECOND_WINDOW: u8 = 5;

/// The departure board application
pub struct Controller<N, H, S, C, Y, D> {
    pub board: Board<N, H, S, C, Y, D>,
    config: BoardConfig,
    conn: ConnectivityManager,
    update: UpdateManager,
    timetable: Timetable,
    last_weather: Option<String<MAX_WEATHER_LEN>>,
    display_refresh: IntervalTimer,
    last_sync_hour: Option<u8>,
    scratch: [u8; SCRATCH_BYTES],
}

impl<N, H, S, C, Y, D> Controller<N, H, S, C, Y, D>
where
    N: NetworkInterface,
    H: HttpClient,
    S: Storage,
    C: SystemClock,
    Y: SystemControl,
    D: DisplayBackend,
{
    pub fn new(config: BoardConfig, board: Board<N, H, S, C, Y, D>) -> Self {
        Self {
            board,
            config,
            conn: ConnectivityManager::new(),
            update: UpdateManager::new(),
            timetable: Timetable::empty(),
            last_weather: None,
            display_refresh: IntervalTimer::new(DISPLAY_REFRESH_MS),
            last_sync_hour: None,
            scratch: [0; SCRATCH_BYTES],
        }
    }

    /// Run forever. Only a display fault escapes.
    pub fn run(&mut self) -> Result<(), DisplayError> {
        self.boot()?;
        loop {
            self.tick()?;
            self.board.system.sleep_ms(TICK_MS);
        }
    }

    /// One-time startup: associate, sync the clock, make sure an offline
    /// dataset exists, load it.
    ///
    /// Connectivity failures never block boot; the board comes up offline
    /// and the tick loop keeps retrying.
    pub fn boot(&mut self) -> Result<(), DisplayError> {
        draw_status(&mut self.board.display, "System Start...")?;

        for round in 0..BOOT_CONNECT_ROUNDS {
            let now = self.board.clock.ticks_ms();
            if self
                .conn
                .ensure_connected(&mut self.board.net, &mut self.board.system, now)
            {
                break;
            }
            if round + 1 < BOOT_CONNECT_ROUNDS {
                draw_status(&mut self.board.display, "Warte auf WiFi...")?;
            }
        }

        if self.conn.is_online() {
            draw_status(&mut self.board.display, "Syncing Time...")?;
            self.board.clock.sync();
        }

        let local = clock::local_time(self.board.clock.now_unix());
        self.update.seed(&mut self.board.storage, local.day);

        if self.board.storage.len(StorageSlot::Timetable).is_err() && self.conn.is_online() {
            draw_status(&mut self.board.display, "Downloading Plan...")?;
            let result = self.update.run(
                &mut self.board.http,
                &mut self.board.storage,
                &mut self.scratch,
                &self.config.endpoints.dataset_url,
                local.day,
            );
            match result {
                Ok(()) => return self.reboot_with_countdown(),
                Err(_) => {
                    self.update.record_failure(self.board.clock.ticks_ms());
                    draw_status(&mut self.board.display, "Download Failed!")?;
                    self.board.system.sleep_ms(2000);
                }
            }
        }

        self.timetable = self.load_timetable();
        Ok(())
    }

    /// One pass of the main loop.
    pub fn tick(&mut self) -> Result<(), DisplayError> {
        let now = self.board.clock.ticks_ms();
        let link = self.board.net.is_connected();
        self.conn.note_link(link);

        let local = clock::local_time(self.board.clock.now_unix());
        self.update.maintain_window(local.hour);

        if self.update.due(local.hour, self.conn.is_online(), now) {
            // on success this reboots; on failure the tick ends early and
            // the cooldown keeps the next attempt away
            return self.run_update(local.day, now);
        }

        if !self.conn.is_online() && self.conn.can_attempt(now) {
            self.conn
                .ensure_connected(&mut self.board.net, &mut self.board.system, now);
        }

        if self.conn.is_online()
            && local.minute == 0
            && local.second < SYNC_SECOND_WINDOW
            && self.last_sync_hour != Some(local.hour)
        {
            self.board.clock.sync();
            self.last_sync_hour = Some(local.hour);
        }

        if self.display_refresh.ready(now) {
            self.refresh_display(&local)?;
            self.display_refresh.fire(now);
        }
        Ok(())
    }

    /// Live first, offline fallback, then compose and draw.
    fn refresh_display(&mut self, local: &LocalTime) -> Result<(), DisplayError> {
        let live = if self.conn.is_online() {
            fetch_live(
                &self.config.endpoints,
                &mut self.conn,
                &mut self.board.net,
                &mut self.board.http,
                &mut self.board.system,
                &mut self.scratch,
                &mut self.last_weather,
            )
        } else {
            None
        };
        let snapshot = match live {
            Some(snapshot) => snapshot,
            None => offline_snapshot(
                &self.timetable,
                local.hour,
                local.minute,
                self.conn.is_online(),
            ),
        };

        let clock_label = local.hhmm();
        let model = compose(&snapshot, &clock_label, self.last_weather.as_deref());
        render(&model, &mut self.board.display)
    }

    fn run_update(&mut self, day: u8, now_ms: u64) -> Result<(), DisplayError> {
        draw_status(&mut self.board.display, "Updating Schedule...")?;
        let result = self.update.run(
            &mut self.board.http,
            &mut self.board.storage,
            &mut self.scratch,
            &self.config.endpoints.dataset_url,
            day,
        );
        match result {
            Ok(()) => self.reboot_with_countdown(),
            Err(_) => {
                self.update.record_failure(now_ms);
                draw_status(&mut self.board.display, "Update Fail. Retry later.")?;
                self.board.system.sleep_ms(2000);
                Ok(())
            }
        }
    }

    /// Visible countdown, then reboot into the fresh dataset.
    fn reboot_with_countdown(&mut self) -> Result<(), DisplayError> {
        for remaining in (1..=REBOOT_COUNTDOWN_S).rev() {
            let mut message: String<24> = String::new();
            let _ = write!(message, "Updated! Reboot {}s", remaining);
            draw_status(&mut self.board.display, &message)?;
            self.board.system.sleep_ms(1000);
        }
        self.board.system.restart();
        Ok(())
    }

    /// A missing or undecodable dataset degrades to an empty timetable;
    /// the board still shows the clock and live data.
    fn load_timetable(&mut self) -> Timetable {
        match self
            .board
            .storage
            .read(StorageSlot::Timetable, &mut self.scratch)
        {
            Ok(len) => {
                Timetable::from_bytes(&self.scratch[..len]).unwrap_or_else(|_| Timetable::empty())
            }
            Err(_) => Timetable::empty(),
        }
    }
}
