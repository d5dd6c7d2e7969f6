//! At most one running instance of a mutating action

use crate::error::{CliError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// Held for the duration of an action; releases the flag on drop, including
/// when the action's future is cancelled
pub(crate) struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    /// Claim the flag, or fail with [`CliError::InFlight`] naming `action`
    pub(crate) fn acquire(flag: &'a AtomicBool, action: &'static str) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CliError::InFlight(action))?;
        Ok(Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
