//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Name of the persisted high score entry
pub(crate) const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Points awarded for eating a piece of food
pub(crate) const FOOD_POINTS: u32 = 10;

/// Points awarded for eating a bonus
pub(crate) const BONUS_POINTS: u32 = 50;

/// Every time eating food brings the score to a multiple of this many points,
/// a bonus appears.  The difficulty level also goes up by one for every this
/// many points.
pub(crate) const LEVEL_POINTS: u32 = 50;

/// How long a bonus stays on the board if it isn't eaten
pub(crate) const BONUS_LIFETIME: Duration = Duration::from_millis(5000);

/// How much shorter the tick interval gets per difficulty level
pub(crate) const LEVEL_SPEEDUP: Duration = Duration::from_millis(5);

/// The tick interval never drops below this, however high the difficulty
pub(crate) const MIN_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// When placing food or a bonus, try this many random cells per board cell
/// before falling back to scanning for a free one
pub(crate) const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

/// Base tick interval bounds & step for the settings form, in milliseconds
pub(crate) const MIN_SPEED: u16 = 50;
pub(crate) const MAX_SPEED: u16 = 200;
pub(crate) const SPEED_STEP: u16 = 10;
pub(crate) const DEFAULT_SPEED: u16 = 100;

/// Board dimension bounds.  The upper bound is what fits on the 80×24 display
/// with two columns per cell.
pub(crate) const MIN_GRID_SIZE: u16 = 2;
pub(crate) const MAX_GRID_SIZE: u16 = 20;
pub(crate) const DEFAULT_GRID_SIZE: u16 = 20;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the bonus
pub(crate) const BONUS_SYMBOL: char = '★';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the bonus
pub(crate) const BONUS_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::SLOW_BLINK);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
