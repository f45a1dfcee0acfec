//! Top-level controller
//!
//! Owns the shared context, the three components and the collaborators
//! they talk to. The firmware builds one at boot and calls
//! [`Controller::tick`] once per control-loop period.

use pointsman_hal::PersistentStore;

use crate::config::{ConfigError, ControllerConfig};
use crate::edit::EditController;
use crate::input::{ButtonState, ChannelLevels, InputMonitor};
use crate::persist::{self, BootOutcome, PersistError, PersistenceScheduler};
use crate::state::{Context, Event, EventSink};
use crate::traits::actuator::resync_all;
use crate::traits::Actuator;

/// Startup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError {
    /// Configuration rejected
    Config(ConfigError),
    /// Store could not be read or initialized
    Persist(PersistError),
}

impl From<ConfigError> for StartError {
    fn from(e: ConfigError) -> Self {
        StartError::Config(e)
    }
}

impl From<PersistError> for StartError {
    fn from(e: PersistError) -> Self {
        StartError::Persist(e)
    }
}

/// The dual-position servo controller
pub struct Controller<S, A, E> {
    ctx: Context,
    edit: EditController,
    input: InputMonitor,
    persistence: PersistenceScheduler,
    store: S,
    actuator: A,
    events: E,
}

impl<S: PersistentStore, A: Actuator, E: EventSink> Controller<S, A, E> {
    /// Validate the configuration, open the store and bring every servo to
    /// its recorded position
    ///
    /// With `force_reinit` the store is overwritten with factory defaults
    /// even if it holds a valid table.
    pub fn start(
        config: ControllerConfig,
        mut store: S,
        mut actuator: A,
        mut events: E,
        force_reinit: bool,
    ) -> Result<Self, StartError> {
        config.validate()?;

        let (table, outcome) = persist::open(&mut store, &config, force_reinit)?;
        match outcome {
            BootOutcome::Initialized(reason) => events.emit(Event::StoreInitialized(reason)),
            BootOutcome::Loaded => events.emit(Event::TableLoaded {
                channels: config.channel_count,
            }),
        }

        resync_all(&table, &mut actuator, &mut events);

        Ok(Self {
            edit: EditController::new(&table),
            ctx: Context::new(config, table),
            input: InputMonitor::new(),
            persistence: PersistenceScheduler::new(),
            store,
            actuator,
            events,
        })
    }

    /// Run one control-loop pass
    ///
    /// Editing goes first, then the commit check, then input tracking.
    pub fn tick(&mut self, now_ms: u32, buttons: ButtonState, levels: ChannelLevels) {
        self.edit.tick(
            &mut self.ctx,
            buttons,
            now_ms,
            &mut self.actuator,
            &mut self.events,
        );
        self.persistence.tick(
            &mut self.ctx,
            &mut self.edit,
            now_ms,
            &mut self.store,
            &mut self.actuator,
            &mut self.events,
        );
        self.input.tick(
            &mut self.ctx,
            levels,
            now_ms,
            &mut self.actuator,
            &mut self.events,
        );
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn edit(&self) -> &EditController {
        &self.edit
    }

    pub fn persistence(&self) -> &PersistenceScheduler {
        &self.persistence
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Split the controller back into its collaborators
    pub fn into_parts(self) -> (S, A, E) {
        (self.store, self.actuator, self.events)
    }
}
