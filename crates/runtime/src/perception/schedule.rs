/// Modulo schedule for OCR extraction.
///
/// OCR runs on ticks where `tick % every == 0`. After every tick the divisor
/// widens to `widened_every` when the measured frame rate fell below
/// `low_fps`, and returns to 1 otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct OcrSchedule {
    every: u32,
    tick: u64,
    low_fps: f64,
    widened_every: u32,
}

impl Default for OcrSchedule {
    fn default() -> Self {
        Self::new(6.0, 3)
    }
}

impl OcrSchedule {
    pub fn new(low_fps: f64, widened_every: u32) -> Self {
        Self {
            every: 1,
            tick: 0,
            low_fps,
            widened_every: widened_every.max(1),
        }
    }

    /// Whether OCR should run on the current tick.
    pub fn due(&self) -> bool {
        self.tick % u64::from(self.every) == 0
    }

    pub fn every(&self) -> u32 {
        self.every
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Moves to the next tick, adapting the divisor to `fps`.
    pub fn advance(&mut self, fps: f64) {
        let every = if fps < self.low_fps {
            self.widened_every
        } else {
            1
        };
        if every != self.every {
            tracing::debug!(fps, every, "ocr schedule changed");
        }
        self.every = every;
        self.tick = self.tick.wrapping_add(1);
    }
}
