use std::fmt;

use crate::api::PerceptionError;

/// Outcome of one perception call that never propagates failure.
///
/// `Fresh` carries what the collaborator returned. `Degraded` carries the
/// default substituted for a failed call together with the cause. Hard
/// failures (no frame at all) surface as the `Err` arm of the enclosing
/// `Result` instead.
#[derive(Debug)]
pub enum Perceived<T> {
    Fresh(T),
    Degraded { value: T, error: PerceptionError },
}

impl<T> Perceived<T> {
    pub fn from_result(
        result: Result<T, PerceptionError>,
        fallback: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => Perceived::Fresh(value),
            Err(error) => Perceived::Degraded {
                value: fallback(),
                error,
            },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Perceived::Fresh(value) | Perceived::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Perceived::Fresh(value) | Perceived::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Perceived::Degraded { .. })
    }

    pub fn error(&self) -> Option<&PerceptionError> {
        match self {
            Perceived::Fresh(_) => None,
            Perceived::Degraded { error, .. } => Some(error),
        }
    }
}

impl<T: Default> Perceived<T> {
    /// Wraps `result`, substituting `T::default()` on failure.
    pub fn or_default(result: Result<T, PerceptionError>) -> Self {
        Self::from_result(result, T::default)
    }
}

/// Individual perception signals that can degrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    Dialog,
    DialogText,
    Choices,
    Position,
    Interactables,
    Fingerprint,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Dialog => "dialog",
            Signal::DialogText => "dialog_text",
            Signal::Choices => "choices",
            Signal::Position => "position",
            Signal::Interactables => "interactables",
            Signal::Fingerprint => "fingerprint",
        };
        f.write_str(name)
    }
}

/// Which signals degraded while assembling one snapshot.
#[derive(Debug, Default)]
pub struct PerceptionReport {
    degraded: Vec<(Signal, PerceptionError)>,
}

impl PerceptionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwraps `outcome`, noting `signal` if it degraded.
    pub fn record<T>(&mut self, signal: Signal, outcome: Perceived<T>) -> T {
        match outcome {
            Perceived::Fresh(value) => value,
            Perceived::Degraded { value, error } => {
                tracing::warn!(%signal, %error, "perception degraded");
                self.degraded.push((signal, error));
                value
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }

    pub fn is_degraded(&self, signal: Signal) -> bool {
        self.degraded.iter().any(|(s, _)| *s == signal)
    }

    pub fn signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.degraded.iter().map(|(signal, _)| *signal)
    }
}
