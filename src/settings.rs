use crate::consts;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Gameplay settings.  These are fixed for the lifetime of an
/// [`Engine`][crate::engine::Engine]; changing them means starting a new game.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameSettings {
    /// Base tick interval
    pub(crate) speed: Speed,
    /// Width & height of the (square) board
    pub(crate) grid_size: GridSize,
    /// Whether leaving the board wraps around to the opposite edge instead of
    /// ending the game
    pub(crate) borderless: bool,
    /// Whether sound cues are played
    pub(crate) sound: bool,
}

impl Default for GameSettings {
    fn default() -> GameSettings {
        GameSettings {
            speed: Speed::default(),
            grid_size: GridSize::default(),
            borderless: false,
            sound: true,
        }
    }
}

impl GameSettings {
    pub(crate) fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Speed => self.speed.into(),
            SettingKey::GridSize => self.grid_size.into(),
            SettingKey::Borderless => self.borderless.into(),
            SettingKey::Sound => self.sound.into(),
        }
    }

    pub(crate) fn set(&mut self, key: SettingKey, value: SettingValue) {
        match key {
            SettingKey::Speed => {
                self.speed = value
                    .try_into()
                    .expect("GameSettings::set(Speed, value) called with non-Speed value");
            }
            SettingKey::GridSize => {
                self.grid_size = value
                    .try_into()
                    .expect("GameSettings::set(GridSize, value) called with non-GridSize value");
            }
            SettingKey::Borderless => {
                self.borderless = value
                    .try_into()
                    .expect("GameSettings::set(Borderless, value) called with non-Bool value");
            }
            SettingKey::Sound => {
                self.sound = value
                    .try_into()
                    .expect("GameSettings::set(Sound, value) called with non-Bool value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum SettingKey {
    Speed,
    GridSize,
    Borderless,
    Sound,
}

impl SettingKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Speed => "Speed",
            SettingKey::GridSize => "Grid Size",
            SettingKey::Borderless => "Borderless",
            SettingKey::Sound => "Sound",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A setting that can be adjusted from the settings form
#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SettingValue {
    Bool(bool),
    Speed,
    GridSize,
}

impl SettingValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for SettingValue {
    fn default() -> SettingValue {
        SettingValue::Bool(false)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SettingValue::Bool(false) => write!(f, "   [ ]    "),
            SettingValue::Bool(true) => write!(f, "   [✓]    "),
            SettingValue::Speed(speed) => write_stepper(f, &speed),
            SettingValue::GridSize(size) => write_stepper(f, &size),
        }
    }
}

/// Write `value` between a pair of arrows that are filled in when the value
/// can be moved in that direction
fn write_stepper<T>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result
where
    T: Adjustable + fmt::Display,
{
    write!(
        f,
        "{left} {value:^6} {right}",
        left = if value.can_decrease() { '◀' } else { '◁' },
        right = if value.can_increase() { '▶' } else { '▷' }
    )
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

/// Base tick interval in milliseconds, clamped to
/// [`MIN_SPEED`][consts::MIN_SPEED]`..=`[`MAX_SPEED`][consts::MAX_SPEED]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd)]
#[serde(from = "u16")]
pub(crate) struct Speed(u16);

impl Speed {
    pub(crate) fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl From<u16> for Speed {
    fn from(ms: u16) -> Speed {
        Speed(ms.clamp(consts::MIN_SPEED, consts::MAX_SPEED))
    }
}

impl Default for Speed {
    fn default() -> Speed {
        Speed(consts::DEFAULT_SPEED)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{} ms", self.0))
    }
}

impl Adjustable for Speed {
    fn increase(&mut self) {
        *self = Speed::from(self.0.saturating_add(consts::SPEED_STEP));
    }

    fn decrease(&mut self) {
        *self = Speed::from(self.0.saturating_sub(consts::SPEED_STEP));
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        self.0 < consts::MAX_SPEED
    }

    fn can_decrease(&self) -> bool {
        self.0 > consts::MIN_SPEED
    }
}

/// Board dimension, clamped to
/// [`MIN_GRID_SIZE`][consts::MIN_GRID_SIZE]`..=`[`MAX_GRID_SIZE`][consts::MAX_GRID_SIZE]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd)]
#[serde(from = "u16")]
pub(crate) struct GridSize(u16);

impl GridSize {
    pub(crate) fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for GridSize {
    fn from(size: u16) -> GridSize {
        GridSize(size.clamp(consts::MIN_GRID_SIZE, consts::MAX_GRID_SIZE))
    }
}

impl Default for GridSize {
    fn default() -> GridSize {
        GridSize(consts::DEFAULT_GRID_SIZE)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl Adjustable for GridSize {
    fn increase(&mut self) {
        *self = GridSize::from(self.0.saturating_add(1));
    }

    fn decrease(&mut self) {
        *self = GridSize::from(self.0.saturating_sub(1));
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        self.0 < consts::MAX_GRID_SIZE
    }

    fn can_decrease(&self) -> bool {
        self.0 > consts::MIN_GRID_SIZE
    }
}
