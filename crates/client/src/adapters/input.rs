use std::time::Duration;

use autoplay_core::Key;
use autoplay_runtime::{InputDriver, InputError};

/// Input sink that logs every key instead of sending it.
#[derive(Clone, Debug, Default)]
pub struct LoggingInputDriver {
    sent: u64,
}

impl InputDriver for LoggingInputDriver {
    fn press(&mut self, key: Key) -> Result<(), InputError> {
        self.sent += 1;
        tracing::info!(%key, "press");
        Ok(())
    }

    fn hold(&mut self, key: Key, duration: Duration) -> Result<(), InputError> {
        self.sent += 1;
        tracing::info!(%key, ?duration, "hold");
        Ok(())
    }
}
