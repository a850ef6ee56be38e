// frame.rs - Animation loop state machine
//
//   Stopped --start--> Running --cancel--> Stopped
//
// There is no pause. A resize cancels the pending frame and starts over,
// so at most one frame is ever outstanding.

use crate::error::EngineError;

/// Opaque id of a scheduled frame (rAF id in the browser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host per-frame callback mechanism.
pub trait Scheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopState {
    Stopped,
    Running {
        pending: FrameHandle,
        /// Scheduler timestamp of the (re)start; clock time is `now - origin`.
        origin: f64,
    },
}

#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self { state: LoopState::Stopped }
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Handle of the outstanding frame, if running.
    pub fn pending(&self) -> Option<FrameHandle> {
        match self.state {
            LoopState::Running { pending, .. } => Some(pending),
            LoopState::Stopped => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Stopped -> Running. Restarting a running loop cancels it first.
    pub fn start<S: Scheduler + ?Sized>(&mut self, now: f64, scheduler: &mut S) -> Result<(), EngineError> {
        self.cancel(scheduler);
        let pending = scheduler.request_frame()?;
        self.state = LoopState::Running { pending, origin: now };
        log::debug!("frame loop started at {now:.1}ms");
        Ok(())
    }

    /// Running -> Stopped, cancelling the outstanding frame.
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let LoopState::Running { pending, .. } = self.state {
            scheduler.cancel_frame(pending);
            log::debug!("frame loop cancelled ({pending:?})");
        }
        self.state = LoopState::Stopped;
    }

    /// A scheduled frame fired. Returns the clock time to render at, or
    /// None if the frame is stale (cancelled or superseded).
    pub fn fire(&self, handle: FrameHandle, now: f64) -> Option<f64> {
        match self.state {
            LoopState::Running { pending, origin } if pending == handle => Some((now - origin).max(0.0)),
            _ => None,
        }
    }

    /// Schedule the next frame after a tick. No-op when stopped.
    pub fn schedule_next<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Result<(), EngineError> {
        if let LoopState::Running { origin, .. } = self.state {
            match scheduler.request_frame() {
                Ok(pending) => self.state = LoopState::Running { pending, origin },
                Err(e) => {
                    self.state = LoopState::Stopped;
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

/// Scheduler driven by explicit calls, for JS-ticked playback and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: i32,
    pending: Option<FrameHandle>,
    last_cancelled: Option<FrameHandle>,
    cancel_count: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Take the pending frame so it can be fired.
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Most recently cancelled handle.
    pub fn last_cancelled(&self) -> Option<FrameHandle> {
        self.last_cancelled
    }

    pub fn cancel_count(&self) -> u64 {
        self.cancel_count
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError> {
        self.next += 1;
        let h = FrameHandle(self.next);
        self.pending = Some(h);
        Ok(h)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.last_cancelled = Some(handle);
        self.cancel_count += 1;
    }
}
