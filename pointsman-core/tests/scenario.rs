//! End-to-end run of the controller against a RAM store and a recording
//! actuator: corrupt store, trim one channel, flip its input, wait for the
//! autosave.

use pointsman_core::config::ControllerConfig;
use pointsman_core::input::{Button, ButtonState, ChannelLevels};
use pointsman_core::persist::ReinitReason;
use pointsman_core::state::{Event, EventSink};
use pointsman_core::table::Slot;
use pointsman_core::traits::{Actuator, ActuatorError, Move};
use pointsman_core::Controller;
use pointsman_hal::store::check_bounds;
use pointsman_hal::{PersistentStore, StoreError};

struct RamStore(Vec<u8>);

impl PersistentStore for RamStore {
    fn capacity(&self) -> usize {
        self.0.len()
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StoreError> {
        check_bounds(self.capacity(), offset, buffer.len())?;
        buffer.copy_from_slice(&self.0[offset..offset + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StoreError> {
        check_bounds(self.capacity(), offset, data.len())?;
        self.0[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }
}

#[derive(Default)]
struct Servos(Vec<Move>);

impl Actuator for Servos {
    fn move_eased(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError> {
        self.0.push(Move::eased(channel, angle));
        Ok(())
    }

    fn move_immediate(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError> {
        self.0.push(Move::immediate(channel, angle));
        Ok(())
    }
}

#[derive(Default)]
struct Log(Vec<Event>);

impl EventSink for Log {
    fn emit(&mut self, event: Event) {
        self.0.push(event);
    }
}

const TICK: u32 = 100;

type TestController = Controller<RamStore, Servos, Log>;

/// Press and release `button`, one tick each, inputs all low
fn press(controller: &mut TestController, button: Button, now: &mut u32) {
    controller.tick(*now, ButtonState::only(button), ChannelLevels::new());
    *now += TICK;
    controller.tick(*now, ButtonState::RELEASED, ChannelLevels::new());
    *now += TICK;
}

#[test]
fn scenario_trim_flip_autosave() {
    // Garbage where the marker should be
    let mut bytes = vec![0x3C; 64];
    bytes[0] = 0x00;

    let config = ControllerConfig::default();
    let mut controller: TestController =
        Controller::start(config, RamStore(bytes), Servos::default(), Log::default(), false)
            .unwrap();

    assert_eq!(
        controller.events().0,
        vec![Event::StoreInitialized(ReinitReason::MarkerMismatch)]
    );
    let table = &controller.context().table;
    assert_eq!(table.position(3, Slot::First), Some(130));
    assert_eq!(table.position(3, Slot::Second), Some(50));
    assert_eq!(table.slot(3), Some(Slot::First));

    let mut now = 0;
    for _ in 0..3 {
        press(&mut controller, Button::NextChannel, &mut now);
    }
    assert_eq!(controller.edit().cursor().channel(), 3);
    assert_eq!(controller.edit().cursor().slot(), Slot::First);

    for _ in 0..25 {
        press(&mut controller, Button::Increase, &mut now);
    }
    assert_eq!(controller.context().table.position(3, Slot::First), Some(155));
    assert_eq!(
        controller.actuator().0.last(),
        Some(&Move::immediate(3, 155))
    );

    controller.actuator_mut().0.clear();
    let flipped = ChannelLevels::new().with(3, true);
    controller.tick(now, ButtonState::RELEASED, flipped);
    let last_edit = now;

    assert_eq!(controller.context().table.slot(3), Some(Slot::Second));
    assert_eq!(controller.actuator().0, vec![Move::eased(3, 50)]);

    // Idle until just before the quiet period ends: nothing written yet
    while now < last_edit + config.quiet_period_ms - TICK {
        now += TICK;
        controller.tick(now, ButtonState::RELEASED, flipped);
    }
    assert_eq!(controller.store().0[4], 130);
    assert!(controller.context().dirty.is_dirty());

    now += TICK;
    controller.tick(now, ButtonState::RELEASED, flipped);

    assert!(!controller.context().dirty.is_dirty());
    assert_eq!(controller.persistence().commits(), 1);

    let stored = &controller.store().0;
    assert_eq!(stored[0], 0xA5);
    // first[3], second[3], slot[3]
    assert_eq!(stored[1 + 3], 155);
    assert_eq!(stored[1 + 8 + 3], 50);
    assert_eq!(stored[1 + 16 + 3], 1);
}
