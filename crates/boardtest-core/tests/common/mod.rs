//! Mock ports shared by the use case tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use boardtest_core::app::{BoardParts, BoardUsecases};
use boardtest_core::domain::entity::{ClimateReading, RgbColor};
use boardtest_core::domain::ports::{
    BoardHardware, ClimateSensor, DisplayError, LedError, LightSensor, ProvisioningStateReader,
    RandomSource, RemoteReceiver, RgbOutput, SensorError, SettingsError, SettingsReader,
    SettingsWriter, TextDisplay,
};
use boardtest_core::domain::provisioning::ProvisioningState;
use boardtest_core::domain::settings::BoardSettings;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Cursor(u8, u8),
    Print(String),
}

#[derive(Clone, Default)]
pub struct MockDisplay {
    pub ops: Rc<RefCell<Vec<DisplayOp>>>,
}

impl MockDisplay {
    pub fn printed(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Print(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn take(&self) -> Vec<DisplayOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }
}

impl TextDisplay for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ops.borrow_mut().push(DisplayOp::Clear);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.ops.borrow_mut().push(DisplayOp::Cursor(col, row));
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        self.ops.borrow_mut().push(DisplayOp::Print(text.to_string()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockRgb {
    pub writes: Rc<RefCell<Vec<RgbColor>>>,
}

impl RgbOutput for MockRgb {
    fn write_color(&mut self, color: RgbColor) -> Result<(), LedError> {
        self.writes.borrow_mut().push(color);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockClimate {
    pub queue: Rc<RefCell<VecDeque<Result<ClimateReading, SensorError>>>>,
    pub reads: Rc<Cell<u32>>,
}

impl MockClimate {
    pub fn push(&self, reading: Result<ClimateReading, SensorError>) {
        self.queue.borrow_mut().push_back(reading);
    }
}

impl ClimateSensor for MockClimate {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.reads.set(self.reads.get() + 1);
        self.queue
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(SensorError::Timeout))
    }
}

#[derive(Clone, Default)]
pub struct MockLight {
    pub value: Rc<Cell<u16>>,
}

impl LightSensor for MockLight {
    fn read_light(&mut self) -> Result<u16, SensorError> {
        Ok(self.value.get())
    }
}

#[derive(Clone, Default)]
pub struct MockRemote {
    pub codes: Rc<RefCell<VecDeque<u32>>>,
    pub resumes: Rc<Cell<u32>>,
}

impl MockRemote {
    pub fn push(&self, code: u32) {
        self.codes.borrow_mut().push_back(code);
    }
}

impl RemoteReceiver for MockRemote {
    fn try_receive(&mut self) -> Option<u32> {
        self.codes.borrow_mut().pop_front()
    }

    fn resume(&mut self) {
        self.resumes.set(self.resumes.get() + 1);
    }
}

#[derive(Clone, Default)]
pub struct MockRandom {
    pub values: Rc<RefCell<VecDeque<u32>>>,
}

impl RandomSource for MockRandom {
    fn next_u32(&mut self) -> u32 {
        self.values.borrow_mut().pop_front().unwrap_or(0)
    }
}

#[derive(Clone, Default)]
pub struct MockButton {
    pub pressed: Rc<Cell<bool>>,
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed.get())
    }
}

/// Output line that remembers every level it was driven to.
#[derive(Clone, Default)]
pub struct MockLed {
    pub levels: Rc<RefCell<Vec<bool>>>,
}

impl MockLed {
    pub fn is_on(&self) -> bool {
        self.levels.borrow().last().copied().unwrap_or(false)
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

/// Async delay that returns at once and adds up the requested time.
#[derive(Clone, Default)]
pub struct MockDelay {
    pub total_ms: Rc<Cell<u64>>,
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ns) / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ms));
    }
}

#[derive(Clone)]
pub struct MockConfig {
    pub settings: Rc<RefCell<BoardSettings>>,
    pub state: Rc<Cell<ProvisioningState>>,
    pub writes: Rc<Cell<u32>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            settings: Rc::new(RefCell::new(BoardSettings::default())),
            state: Rc::new(Cell::new(ProvisioningState::ApMode)),
            writes: Rc::new(Cell::new(0)),
        }
    }
}

impl SettingsReader for MockConfig {
    fn read_settings(&self) -> BoardSettings {
        self.settings.borrow().clone()
    }
}

impl SettingsWriter for MockConfig {
    fn write_settings(&mut self, settings: &BoardSettings) -> Result<(), SettingsError> {
        *self.settings.borrow_mut() = settings.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl ProvisioningStateReader for MockConfig {
    fn provisioning_state(&self) -> ProvisioningState {
        self.state.get()
    }
}

pub struct TestHardware;

impl BoardHardware for TestHardware {
    type Display = MockDisplay;
    type Rgb = MockRgb;
    type Climate = MockClimate;
    type Light = MockLight;
    type Remote = MockRemote;
    type Random = MockRandom;
    type Button = MockButton;
    type Led = MockLed;
    type InternalLed = MockLed;
    type Delay = MockDelay;
}

/// Handles kept by a test to drive and observe the mocks.
#[derive(Clone, Default)]
pub struct Handles {
    pub display: MockDisplay,
    pub rgb: MockRgb,
    pub climate: MockClimate,
    pub light: MockLight,
    pub remote: MockRemote,
    pub random: MockRandom,
    pub button: MockButton,
    pub red_led: MockLed,
    pub internal_led: MockLed,
    pub delay: MockDelay,
    pub config: MockConfig,
}

pub fn board() -> (BoardUsecases<TestHardware, MockConfig>, Handles) {
    let handles = Handles::default();
    let parts = BoardParts::<TestHardware> {
        display: handles.display.clone(),
        rgb: handles.rgb.clone(),
        climate: handles.climate.clone(),
        light: handles.light.clone(),
        remote: handles.remote.clone(),
        random: handles.random.clone(),
        button: handles.button.clone(),
        red_led: handles.red_led.clone(),
        internal_led: handles.internal_led.clone(),
        delay: handles.delay.clone(),
    };
    (BoardUsecases::new(parts, handles.config.clone()), handles)
}

pub fn reading(temperature: f32, humidity: f32) -> ClimateReading {
    ClimateReading {
        temperature,
        humidity,
    }
}

pub type TestBoard = BoardUsecases<TestHardware, MockConfig>;
