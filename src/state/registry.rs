//! Timer registry: owns every timer and the schedule driving it

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::{runtime::Handle, task::JoinHandle, time::Instant};
use tracing::{debug, info, trace};

use super::{Timer, TimerId};
use crate::{
    error::TimerError,
    tasks::countdown::{countdown_task, TICK_PERIOD},
};

/// Called with a terminal snapshot each time a timer counts down to zero
pub type CompletionCallback = Arc<dyn Fn(Timer) + Send + Sync>;

/// Outcome of a single tick, telling the countdown task whether to keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tick {
    Continue,
    Finished,
}

/// Handle to the task counting a timer down
#[derive(Debug)]
struct Schedule {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct RegistryState {
    /// Creation order is preserved for listing
    timers: Vec<Timer>,
    /// At most one live schedule per timer
    schedules: HashMap<TimerId, Schedule>,
    next_generation: u64,
    /// Runtime that countdown tasks are spawned on
    runtime: Option<Handle>,
}

impl RegistryState {
    fn find(&self, id: TimerId) -> Result<&Timer, TimerError> {
        self.timers
            .iter()
            .find(|timer| timer.id == id)
            .ok_or(TimerError::NotFound(id))
    }

    fn find_mut(&mut self, id: TimerId) -> Result<&mut Timer, TimerError> {
        self.timers
            .iter_mut()
            .find(|timer| timer.id == id)
            .ok_or(TimerError::NotFound(id))
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(schedule) = self.schedules.remove(&id) {
            schedule.handle.abort();
            debug!("Cancelled schedule {} for timer {}", schedule.generation, id);
        }
    }
}

/// State shared between the registry handles and the countdown tasks
pub(crate) struct Shared {
    state: Mutex<RegistryState>,
    on_complete: Option<CompletionCallback>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // Every critical section leaves the timers consistent, so a poisoned
        // lock still guards valid state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one elapsed second to a running timer.
    ///
    /// A tick whose schedule has since been cancelled or replaced is dropped
    /// without touching the timer.
    pub(crate) fn tick(&self, id: TimerId, generation: u64) -> Tick {
        let completed = {
            let mut guard = self.lock();
            let state = &mut *guard;

            let current = state.schedules.get(&id).map(|schedule| schedule.generation);
            if current != Some(generation) {
                trace!("Dropping stale tick {} for timer {}", generation, id);
                return Tick::Finished;
            }

            let Some(timer) = state.timers.iter_mut().find(|timer| timer.id == id) else {
                state.schedules.remove(&id);
                return Tick::Finished;
            };

            if !timer.is_running {
                state.schedules.remove(&id);
                return Tick::Finished;
            }

            timer.remaining = timer.remaining.saturating_sub(1);
            trace!("Timer {} ticked, {}s remaining", id, timer.remaining);

            if timer.remaining > 0 {
                return Tick::Continue;
            }

            timer.is_running = false;
            let snapshot = timer.clone();
            // The task driving this tick exits on its own, no abort needed
            state.schedules.remove(&id);
            snapshot
        };

        info!("Timer {} ('{}') finished", completed.id, completed.label);

        if let Some(on_complete) = &self.on_complete {
            on_complete(completed);
        }

        Tick::Finished
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, schedule) in state.schedules.drain() {
            schedule.handle.abort();
        }
    }
}

/// Manages any number of independent countdown timers.
///
/// Cloning the registry yields another handle to the same timers. Every
/// command and every tick is serialized behind one mutex.
///
/// Commands that start a countdown spawn a Tokio task on the runtime the
/// registry was created in (or the one given to [`TimerRegistry::on_runtime`]).
/// Without either, they fail with [`TimerError::RuntimeUnavailable`].
#[derive(Clone)]
pub struct TimerRegistry {
    shared: Arc<Shared>,
}

impl TimerRegistry {
    /// Create an empty registry without a completion callback
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create an empty registry that calls `on_complete` whenever a timer
    /// counts down to zero.
    ///
    /// The callback runs on the countdown task after the registry lock has
    /// been released, so it may call back into the registry.
    pub fn with_completion<F>(on_complete: F) -> Self
    where
        F: Fn(Timer) + Send + Sync + 'static,
    {
        Self::build(Some(Arc::new(on_complete)))
    }

    fn build(on_complete: Option<CompletionCallback>) -> Self {
        let state = RegistryState {
            runtime: Handle::try_current().ok(),
            ..RegistryState::default()
        };

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                on_complete,
            }),
        }
    }

    /// Spawn countdown tasks on `runtime`, so commands can be issued from
    /// threads outside of it
    pub fn on_runtime(self, runtime: Handle) -> Self {
        self.shared.lock().runtime = Some(runtime);
        self
    }

    /// Create a timer with the full `duration` (in seconds) remaining.
    ///
    /// With `auto_start` the countdown is armed before the timer becomes
    /// visible to other callers.
    pub fn add_timer(
        &self,
        label: impl Into<String>,
        duration: u64,
        auto_start: bool,
    ) -> Result<TimerId, TimerError> {
        if duration == 0 {
            return Err(TimerError::InvalidArgument(
                "timer duration must be a positive number of seconds".to_string(),
            ));
        }

        let timer = Timer::new(label.into(), duration, auto_start);
        let id = timer.id;

        let mut state = self.shared.lock();
        if auto_start {
            self.arm(&mut state, id)?;
        }
        info!(
            "Added timer {} ('{}') for {}s, running={}",
            id, timer.label, duration, auto_start
        );
        state.timers.push(timer);

        Ok(id)
    }

    /// Start or resume counting down.
    ///
    /// A timer that already reached zero stays completed; it has to be reset
    /// before it can run again.
    pub fn start_timer(&self, id: TimerId) -> Result<(), TimerError> {
        let mut state = self.shared.lock();
        self.start_locked(&mut state, id)
    }

    /// Alias for [`TimerRegistry::start_timer`]
    pub fn resume_timer(&self, id: TimerId) -> Result<(), TimerError> {
        self.start_timer(id)
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause_timer(&self, id: TimerId) -> Result<(), TimerError> {
        let mut state = self.shared.lock();
        Self::pause_locked(&mut state, id)
    }

    /// Pause a running timer, otherwise start it
    pub fn toggle_timer(&self, id: TimerId) -> Result<(), TimerError> {
        let mut state = self.shared.lock();
        if state.find(id)?.is_running {
            Self::pause_locked(&mut state, id)
        } else {
            self.start_locked(&mut state, id)
        }
    }

    /// Stop the timer and restore its full duration
    pub fn reset_timer(&self, id: TimerId) -> Result<(), TimerError> {
        let mut state = self.shared.lock();
        state.find(id)?;
        state.cancel(id);

        let timer = state.find_mut(id)?;
        timer.remaining = timer.duration;
        timer.is_running = false;
        info!("Reset timer {} to {}s", id, timer.duration);

        Ok(())
    }

    /// Stop the timer and forget it
    pub fn delete_timer(&self, id: TimerId) -> Result<(), TimerError> {
        let mut state = self.shared.lock();
        state.find(id)?;
        state.cancel(id);
        state.timers.retain(|timer| timer.id != id);
        info!("Deleted timer {}", id);

        Ok(())
    }

    /// Snapshot of all timers in creation order
    pub fn timers(&self) -> Vec<Timer> {
        self.shared.lock().timers.clone()
    }

    /// Snapshot of a single timer
    pub fn get_timer(&self, id: TimerId) -> Option<Timer> {
        self.shared.lock().find(id).ok().cloned()
    }

    pub fn len(&self) -> usize {
        self.shared.lock().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of timers currently counting down
    pub fn running_count(&self) -> usize {
        self.counts().1
    }

    /// Total and running timers, taken from the same snapshot
    pub fn counts(&self) -> (usize, usize) {
        let state = self.shared.lock();
        let running = state.timers.iter().filter(|timer| timer.is_running).count();
        (state.timers.len(), running)
    }

    fn start_locked(&self, state: &mut RegistryState, id: TimerId) -> Result<(), TimerError> {
        if state.find(id)?.is_completed() {
            debug!("Timer {} already finished, reset it before starting again", id);
            return Ok(());
        }

        self.arm(state, id)?;
        state.find_mut(id)?.is_running = true;
        info!("Started timer {}", id);

        Ok(())
    }

    fn pause_locked(state: &mut RegistryState, id: TimerId) -> Result<(), TimerError> {
        state.find(id)?;
        state.cancel(id);

        let timer = state.find_mut(id)?;
        timer.is_running = false;
        info!("Paused timer {} with {}s remaining", id, timer.remaining);

        Ok(())
    }

    /// Replace any schedule for `id` with a fresh one-second countdown
    fn arm(&self, state: &mut RegistryState, id: TimerId) -> Result<(), TimerError> {
        let runtime = state
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(TimerError::RuntimeUnavailable)?;

        state.cancel(id);

        state.next_generation = state.next_generation.wrapping_add(1);
        let generation = state.next_generation;
        // Read the clock of the runtime the task will run on
        let first_tick = {
            let _guard = runtime.enter();
            Instant::now() + TICK_PERIOD
        };

        let handle = runtime.spawn(countdown_task(
            Arc::downgrade(&self.shared),
            id,
            generation,
            first_tick,
        ));
        state.schedules.insert(id, Schedule { generation, handle });
        debug!("Armed schedule {} for timer {}", generation, id);

        Ok(())
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("TimerRegistry")
            .field("timers", &state.timers)
            .field("scheduled", &state.schedules.len())
            .field("on_complete", &self.shared.on_complete.is_some())
            .finish()
    }
}
