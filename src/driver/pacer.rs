use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// How often the fps readout is refreshed, in seconds.
const FPS_REFRESH: f64 = 0.2;

/// Time source for the pacer.
pub trait Clock {
    /// Wall-clock time since the Unix epoch.
    fn now(&self) -> Duration;
    fn sleep(&self, d: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Seconds since the previous tick, never less than one frame.
    pub dt: f64,
    /// Wall-clock seconds.
    pub now: f64,
    pub fps: u32,
}

/// Caps the loop at `max_fps` by sleeping out the rest of each frame.
pub struct FramePacer<C: Clock> {
    clock: C,
    min_dt: Duration,
    last: Duration,
    since_fps: f64,
    fps: u32,
}

impl<C: Clock> FramePacer<C> {
    pub fn new(clock: C, max_fps: u32) -> Self {
        let last = clock.now();
        FramePacer {
            clock,
            min_dt: Duration::from_secs_f64(1. / max_fps.max(1) as f64),
            last,
            since_fps: 0.,
            fps: 0,
        }
    }

    pub fn tick(&mut self) -> Tick {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last);
        let mut dt = elapsed.as_secs_f64();
        if elapsed < self.min_dt {
            dt = self.min_dt.as_secs_f64();
            self.clock.sleep(self.min_dt - elapsed);
        }
        self.last = self.clock.now();

        self.since_fps += dt;
        if self.since_fps > FPS_REFRESH {
            self.since_fps = 0.;
            self.fps = (1. / dt) as u32;
        }

        Tick {
            dt,
            now: now.as_secs_f64(),
            fps: self.fps,
        }
    }
}
