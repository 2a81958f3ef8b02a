//! Still-capture sequencing driven by auto-focus and auto-exposure results.
//!
//! The camera delivers a stream of capture results. [`CaptureStateMachine`]
//! consumes them and tells the caller which request to issue next. It never
//! talks to hardware and never reads a clock: the caller passes a monotonic
//! timestamp with every result.
//!
//! ```
//! use zencamera::{
//!     AeState, AfState, CaptureAction, CaptureResult, CaptureState, CaptureStateMachine,
//! };
//!
//! let mut m = CaptureStateMachine::default();
//! assert_eq!(m.request_capture(), CaptureAction::LockFocus);
//!
//! let locked = CaptureResult::new(Some(AfState::FocusedLocked), Some(AeState::Converged));
//! assert_eq!(m.process(locked, 0), Some(CaptureAction::CaptureStill));
//! assert_eq!(m.state(), CaptureState::Capturing);
//!
//! assert_eq!(m.capture_completed(), CaptureAction::UnlockFocus);
//! assert_eq!(m.state(), CaptureState::Preview);
//! ```

use crate::config::NegotiationConfig;

/// Auto-focus state reported with a capture result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AfState {
    /// Auto-focus is idle or off.
    Inactive,
    /// Continuous focus is sweeping.
    PassiveScan,
    /// Continuous focus settled in focus.
    PassiveFocused,
    /// A triggered focus sweep is running.
    ActiveScan,
    /// A triggered sweep finished in focus.
    FocusedLocked,
    /// A triggered sweep finished out of focus.
    NotFocusedLocked,
    /// Continuous focus settled out of focus.
    PassiveUnfocused,
}

impl AfState {
    /// Map the platform's `CONTROL_AF_STATE_*` value.
    pub const fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Inactive,
            1 => Self::PassiveScan,
            2 => Self::PassiveFocused,
            3 => Self::ActiveScan,
            4 => Self::FocusedLocked,
            5 => Self::NotFocusedLocked,
            6 => Self::PassiveUnfocused,
            _ => return None,
        })
    }

    /// Whether the focus sweep has finished, successfully or not.
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::FocusedLocked | Self::NotFocusedLocked)
    }
}

/// Auto-exposure state reported with a capture result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AeState {
    /// Auto-exposure is idle or off.
    Inactive,
    /// Exposure has not settled yet.
    Searching,
    /// Exposure settled.
    Converged,
    /// Exposure is held.
    Locked,
    /// Exposure settled, but only with the flash.
    FlashRequired,
    /// The precapture sequence is running.
    Precapture,
}

impl AeState {
    /// Map the platform's `CONTROL_AE_STATE_*` value.
    pub const fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Inactive,
            1 => Self::Searching,
            2 => Self::Converged,
            3 => Self::Locked,
            4 => Self::FlashRequired,
            5 => Self::Precapture,
            _ => return None,
        })
    }
}

/// The fields of a capture result the state machine looks at.
///
/// Either state may be missing, e.g. on devices without auto-focus or in
/// partial results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CaptureResult {
    /// Auto-focus state, if reported.
    pub af: Option<AfState>,
    /// Auto-exposure state, if reported.
    pub ae: Option<AeState>,
}

impl CaptureResult {
    /// Result with the given states.
    pub const fn new(af: Option<AfState>, ae: Option<AeState>) -> Self {
        Self { af, ae }
    }
}

/// Where a still capture is in its sequence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaptureState {
    /// Preview is running. Focus is re-locked periodically.
    #[default]
    Preview,
    /// Focus lock requested for a still capture.
    Locking,
    /// Focus locked but exposure not converged; precapture metering pending.
    Locked,
    /// Precapture metering requested.
    Precapture,
    /// Waiting for precapture metering to finish.
    Waiting,
    /// Still capture requested.
    Capturing,
}

/// A request the caller should send to the camera.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CaptureAction {
    /// Trigger an auto-focus lock.
    LockFocus,
    /// Cancel the auto-focus lock and resume preview focusing.
    UnlockFocus,
    /// Trigger the precapture metering sequence, then call
    /// [`CaptureStateMachine::precapture_started`].
    RunPrecapture,
    /// Capture the still picture.
    CaptureStill,
}

/// Drives a still capture through focus lock and precapture metering.
///
/// While in [`CaptureState::Preview`] it also keeps focus fresh: an inactive
/// focus is locked right away, a failed lock is retried after the short
/// delay, and a successful lock is released after the long delay so that
/// continuous focus can take over again.
///
/// With auto-focus off, [`request_capture`](Self::request_capture) skips the
/// focus lock and asks for the still right away.
#[derive(Clone, Debug)]
pub struct CaptureStateMachine {
    state: CaptureState,
    auto_focus: bool,
    last_af: Option<AfState>,
    lock_at: Option<u64>,
    unlock_at: Option<u64>,
    long_delay_ms: u64,
    short_delay_ms: u64,
}

impl Default for CaptureStateMachine {
    fn default() -> Self {
        Self::new(&NegotiationConfig::default())
    }
}

impl CaptureStateMachine {
    /// New machine in [`CaptureState::Preview`], with focus delays from `config`.
    pub fn new(config: &NegotiationConfig) -> Self {
        Self {
            state: CaptureState::Preview,
            auto_focus: config.auto_focus,
            last_af: None,
            lock_at: None,
            unlock_at: None,
            long_delay_ms: config.focus_unlock_delay_ms,
            short_delay_ms: config.focus_retry_delay_ms,
        }
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Whether still captures lock focus first.
    pub fn auto_focus(&self) -> bool {
        self.auto_focus
    }

    /// Turn the focus lock before still captures on or off.
    pub fn set_auto_focus(&mut self, on: bool) {
        self.auto_focus = on;
    }

    /// Pending focus-lock deadline, if any.
    pub fn lock_deadline(&self) -> Option<u64> {
        self.lock_at
    }

    /// Pending focus-unlock deadline, if any.
    pub fn unlock_deadline(&self) -> Option<u64> {
        self.unlock_at
    }

    fn set_state(&mut self, state: CaptureState) {
        tracing::trace!(from = ?self.state, to = ?state, "capture state");
        self.state = state;
    }

    /// Start a still capture.
    ///
    /// Locks focus first when auto-focus is on. Otherwise moves straight to
    /// [`CaptureState::Capturing`].
    pub fn request_capture(&mut self) -> CaptureAction {
        if self.auto_focus {
            self.set_state(CaptureState::Locking);
            CaptureAction::LockFocus
        } else {
            self.set_state(CaptureState::Capturing);
            CaptureAction::CaptureStill
        }
    }

    /// The precapture request has been sent.
    ///
    /// Only meaningful in [`CaptureState::Locked`]; ignored otherwise.
    pub fn precapture_started(&mut self) {
        if self.state == CaptureState::Locked {
            self.set_state(CaptureState::Precapture);
        }
    }

    /// The still has been taken. Returns to preview.
    pub fn capture_completed(&mut self) -> CaptureAction {
        self.set_state(CaptureState::Preview);
        CaptureAction::UnlockFocus
    }

    /// Feed one capture result, observed at `now_ms` on a monotonic clock.
    pub fn process(&mut self, result: CaptureResult, now_ms: u64) -> Option<CaptureAction> {
        match self.state {
            CaptureState::Preview => self.process_preview(result, now_ms),
            CaptureState::Locking => {
                let af = result.af?;
                if !af.is_locked() {
                    return None;
                }
                if matches!(result.ae, None | Some(AeState::Converged)) {
                    self.set_state(CaptureState::Capturing);
                    Some(CaptureAction::CaptureStill)
                } else {
                    self.set_state(CaptureState::Locked);
                    Some(CaptureAction::RunPrecapture)
                }
            }
            CaptureState::Precapture => {
                if matches!(
                    result.ae,
                    None | Some(AeState::Precapture) | Some(AeState::FlashRequired)
                ) {
                    self.set_state(CaptureState::Waiting);
                }
                None
            }
            CaptureState::Waiting => {
                if result.ae != Some(AeState::Precapture) {
                    self.set_state(CaptureState::Capturing);
                    Some(CaptureAction::CaptureStill)
                } else {
                    None
                }
            }
            CaptureState::Locked | CaptureState::Capturing => None,
        }
    }

    fn process_preview(&mut self, result: CaptureResult, now_ms: u64) -> Option<CaptureAction> {
        // At most one timer fires per result; lock wins.
        let mut action = None;
        if self.lock_at.is_some_and(|t| t < now_ms) {
            self.lock_at = None;
            action = Some(CaptureAction::LockFocus);
        } else if self.unlock_at.is_some_and(|t| t < now_ms) {
            self.unlock_at = None;
            action = Some(CaptureAction::UnlockFocus);
        }

        if let Some(af) = result.af
            && self.last_af != Some(af)
        {
            tracing::trace!(?af, now_ms, "auto-focus state changed");
            match af {
                AfState::Inactive => {
                    self.lock_at = Some(now_ms);
                    self.unlock_at = None;
                }
                AfState::FocusedLocked => {
                    self.lock_at = None;
                    self.unlock_at = Some(now_ms.saturating_add(self.long_delay_ms));
                }
                AfState::NotFocusedLocked => {
                    self.lock_at = Some(now_ms.saturating_add(self.short_delay_ms));
                    self.unlock_at = None;
                }
                AfState::PassiveUnfocused | AfState::PassiveFocused => {
                    self.lock_at = None;
                    self.unlock_at = None;
                }
                AfState::ActiveScan | AfState::PassiveScan => {}
            }
        }
        self.last_af = result.af;
        action
    }
}
