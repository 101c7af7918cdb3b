mod paused;
use self::paused::{PauseOpt, Paused};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::engine::{Direction, Engine, Phase, Snapshot, SystemClock, Tick};
use crate::highscore::FileStore;
use crate::menu::MainMenu;
use crate::sound::{Cue, Sound};
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use log::{debug, info, warn};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The game screen: drives an [`Engine`] from the terminal's event loop and
/// draws it
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: Engine<FileStore, R>,
    globals: Globals,
    sound: Sound,
    pause_menu: Option<Paused>,
    /// When the next tick is due.  `None` until the first wait after a tick.
    next_tick: Option<Instant>,
    /// Shown in the message line after a crash until the snake next eats
    notice: Option<Notice>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        let engine = Engine::new_with_parts(
            globals.settings,
            globals.store.clone(),
            rng,
            SystemClock,
        );
        info!("Starting game with {:?}", globals.settings);
        Game {
            engine,
            sound: Sound::new(globals.settings.sound),
            globals,
            pause_menu: None,
            next_tick: None,
            notice: None,
        }
    }

    /// Wait for input, the next tick, or the bonus expiry, whichever comes
    /// first, and act on it
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if let Some(id) = self.engine.poll_expiry() {
            debug!("Bonus {id:?} timed out");
        }
        let next_tick = if self.engine.phase().is_live() {
            let interval = self.engine.tick_interval();
            Some(*self.next_tick.get_or_insert_with(|| Instant::now() + interval))
        } else {
            None
        };
        let deadline = match (next_tick, self.engine.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        if let Some(when) = deadline {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                if next_tick.is_some_and(|t| t <= Instant::now()) {
                    self.tick();
                }
                return Ok(None);
            }
        }
        Ok(self.handle_event(read()?))
    }

    fn tick(&mut self) {
        self.next_tick = None;
        let outcome = self.engine.advance();
        match outcome {
            Tick::AteFood { .. } | Tick::AteBonus => self.notice = None,
            Tick::Crashed {
                score,
                new_high_score,
            } => {
                self.notice = Some(Notice {
                    score,
                    new_high_score,
                });
            }
            _ => (),
        }
        if let Some(cue) = Cue::for_tick(outcome) {
            if let Err(e) = self.sound.play(cue, &mut io::stdout()) {
                warn!("Failed to play sound cue: {e}");
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Some(ref mut menu) = self.pause_menu {
            match menu.handle_event(event)? {
                PauseOpt::Resume => self.resume(),
                PauseOpt::Restart => self.restart(),
                PauseOpt::MainMenu => return Some(self.main_menu()),
                PauseOpt::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        if self.engine.phase() == Phase::Exhausted {
            match Command::from_key_event(event.as_key_press_event()?)? {
                Command::R => self.restart(),
                Command::M => return Some(self.main_menu()),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            }
            return None;
        }
        if event == Event::FocusLost {
            self.pause();
            return None;
        }
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(Screen::Quit),
            Command::Up => self.engine.set_direction(Direction::Up),
            Command::Down => self.engine.set_direction(Direction::Down),
            Command::Left => self.engine.set_direction(Direction::Left),
            Command::Right => self.engine.set_direction(Direction::Right),
            Command::Esc | Command::Space | Command::P => self.pause(),
            _ => (),
        }
        None
    }

    fn pause(&mut self) {
        self.engine.set_paused(true);
        if self.engine.phase() == Phase::Paused {
            self.pause_menu = Some(Paused::new());
        }
    }

    fn resume(&mut self) {
        self.engine.set_paused(false);
        self.pause_menu = None;
        self.next_tick = None;
    }

    fn restart(&mut self) {
        self.engine.reset();
        self.pause_menu = None;
        self.next_tick = None;
        self.notice = None;
    }

    fn main_menu(&self) -> Screen {
        Screen::Main(MainMenu::new(self.globals.clone()))
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.engine.snapshot();
        let display = get_display_area(area);
        let [bar_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {}    High Score: {}    Level: {}",
                snap.score, snap.high_score, snap.difficulty
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(bar_area, buf);

        let grid = self.engine.settings().grid_size.get();
        let block_area = center_rect(
            board_area,
            Size::new(
                grid.saturating_mul(2).saturating_add(2),
                grid.saturating_add(2),
            ),
        );
        if self.engine.settings().borderless {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }
        draw_board(&snap, block_area.inner(Margin::new(1, 1)), buf);

        if let Some(paused) = self.pause_menu.filter(|_| snap.paused) {
            let pause_area = center_rect(display, Size::new(Paused::WIDTH, Paused::HEIGHT));
            paused.render(pause_area, buf);
        }

        let message = if snap.phase == Phase::Exhausted {
            Line::from_iter([
                Span::raw(" BOARD FULL!  Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Main Menu ("),
                Span::styled("m", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
        } else if let Some(notice) = self.notice {
            Line::raw(notice.to_string())
        } else {
            Line::from_iter([
                Span::raw(" Pause ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("Ctrl-C", consts::KEY_STYLE),
                Span::raw(")"),
            ])
        };
        message.render(msg_area, buf);
    }
}

fn draw_board(snap: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
    let mut canvas = Canvas { area, buf };
    let mut segments = snap.snake.iter();
    let head = segments.next();
    for &p in segments {
        canvas.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
    }
    if let Some(food) = snap.food {
        canvas.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
    }
    if let Some(bonus) = snap.bonus {
        canvas.draw_cell(bonus, consts::BONUS_SYMBOL, consts::BONUS_STYLE);
    }
    if let Some(&head) = head {
        canvas.draw_cell(head, head_symbol(snap.direction), consts::SNAKE_STYLE);
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// What happened in the last game, for display after the board resets
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Notice {
    score: u32,
    new_high_score: bool,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " GAME OVER with {} points", self.score)?;
        if self.new_high_score {
            write!(f, "  NEW HIGH SCORE!")?;
        }
        Ok(())
    }
}

/// Draws onto the board area of a buffer, mapping each board cell to two
/// terminal columns
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(2)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// The border drawn around a borderless board, where the snake wraps around
/// instead of crashing
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw_char(corner, '·');
        }
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameSettings, GridSize};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Modifier;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(settings: GameSettings) -> Game<ChaCha12Rng> {
        let globals = Globals {
            settings: GameSettings {
                sound: false,
                ..settings
            },
            store: FileStore::new(None),
        };
        Game::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)))
            .map(|c| c.symbol())
            .collect()
    }

    /// Position in an 80×24 buffer of board cell `pos` on a 20×20 board
    fn screen_pos(pos: Position) -> (u16, u16) {
        (20 + pos.x * 2, 2 + pos.y)
    }

    #[test]
    fn new_game_layout() {
        let game = new_game(GameSettings::default());
        let buffer = render(&game);
        assert_eq!(
            row(&buffer, 0).trim_end(),
            " Score: 0    High Score: 0    Level: 1"
        );
        assert!(buffer
            .cell((0u16, 0u16))
            .unwrap()
            .modifier
            .contains(Modifier::REVERSED));
        let top = row(&buffer, 1);
        assert_eq!(top.trim(), format!("┌{}┐", "─".repeat(40)));
        assert_eq!(row(&buffer, 22).trim(), format!("└{}┘", "─".repeat(40)));
        let head = buffer.cell(screen_pos(Position::new(10, 10))).unwrap();
        assert_eq!(head.symbol(), "<");
        assert_eq!(head.fg, consts::SNAKE_STYLE.fg.unwrap());
        let food = game.engine.snapshot().food.unwrap();
        let food_cell = buffer.cell(screen_pos(food)).unwrap();
        assert_eq!(food_cell.symbol(), "●");
        assert_eq!(row(&buffer, 23).trim_end(), " Pause (p) — Quit (Ctrl-C)");
    }

    #[test]
    fn borderless_board_has_dotted_border() {
        let game = new_game(GameSettings {
            borderless: true,
            ..GameSettings::default()
        });
        let buffer = render(&game);
        assert_eq!(row(&buffer, 1).trim(), format!("·{}·", "⋯".repeat(40)));
        assert_eq!(row(&buffer, 10).trim_start().chars().next(), Some('⋮'));
    }

    #[test]
    fn small_board_is_centered() {
        let game = new_game(GameSettings {
            grid_size: GridSize::from(4),
            ..GameSettings::default()
        });
        let buffer = render(&game);
        let rows = (0..24).map(|y| row(&buffer, y)).collect::<Vec<_>>();
        let top = rows
            .iter()
            .position(|r| r.contains('┌'))
            .expect("board should have a top border");
        assert_eq!(rows[top].trim(), "┌────────┐");
        assert_eq!(rows[top + 5].trim(), "└────────┘");
    }

    #[test]
    fn pause_and_resume() {
        let mut game = new_game(GameSettings::default());
        assert!(game.handle_event(key(KeyCode::Char(' '))).is_none());
        assert_eq!(game.engine.phase(), Phase::Paused);
        let buffer = render(&game);
        let rows = (0..24).map(|y| row(&buffer, y)).collect::<Vec<_>>();
        assert!(rows.iter().any(|r| r.contains("─ PAUSED ─")));
        assert!(rows.iter().any(|r| r.contains("» Resume (Esc)")));
        // Steering is ignored while the menu is up
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        assert_eq!(game.engine.snapshot().direction, Direction::Right);
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert_eq!(game.engine.phase(), Phase::Running);
        assert!(game.pause_menu.is_none());
    }

    #[test]
    fn focus_loss_pauses() {
        let mut game = new_game(GameSettings::default());
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert!(game.pause_menu.is_some());
        assert!(game.engine.snapshot().paused);
    }

    #[test]
    fn steer() {
        let mut game = new_game(GameSettings::default());
        assert!(game.handle_event(key(KeyCode::Char('k'))).is_none());
        assert_eq!(game.engine.snapshot().direction, Direction::Up);
        let buffer = render(&game);
        let head = buffer.cell(screen_pos(Position::new(10, 10))).unwrap();
        assert_eq!(head.symbol(), "v");
    }

    #[test]
    fn restart_from_pause_menu() {
        let mut game = new_game(GameSettings::default());
        game.tick();
        assert_eq!(game.engine.snapshot().snake[0], Position::new(11, 10));
        game.handle_event(key(KeyCode::Esc));
        assert!(game.handle_event(key(KeyCode::Char('r'))).is_none());
        let snap = game.engine.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.snake[0], Position::new(10, 10));
        assert!(game.pause_menu.is_none());
    }

    #[test]
    fn quit_from_pause_menu() {
        let mut game = new_game(GameSettings::default());
        game.handle_event(key(KeyCode::Char('p')));
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('q'))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn main_menu_from_pause_menu() {
        let mut game = new_game(GameSettings::default());
        game.handle_event(key(KeyCode::Esc));
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('m'))),
            Some(Screen::Main(_))
        ));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut game = new_game(GameSettings::default());
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(game.handle_event(event), Some(Screen::Quit)));
    }

    #[test]
    fn crash_shows_notice() {
        let mut game = new_game(GameSettings {
            grid_size: GridSize::from(2),
            ..GameSettings::default()
        });
        // The snake starts at (1, 1) heading right, into the wall
        game.tick();
        assert_eq!(
            game.notice,
            Some(Notice {
                score: 0,
                new_high_score: false
            })
        );
        let buffer = render(&game);
        assert_eq!(row(&buffer, 23).trim_end(), " GAME OVER with 0 points");
    }
}
