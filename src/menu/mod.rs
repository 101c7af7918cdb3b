mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::highscore::HighScoreStore;
use crate::settings::{Adjustable, GameSettings, SettingKey, SettingValue};
use crate::util::{get_display_area, EnumExt};
use crossterm::event::{read, Event};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
    settings: SettingsMenu,
    globals: Globals,
    /// The record as of when the menu was opened
    high_score: u32,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        let high_score = globals.store.load();
        MainMenu {
            selection: Selection::default(),
            settings: SettingsMenu::new(globals.settings),
            globals,
            high_score,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.select(Selection::PlayButton, None),
            (_, Command::End) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Enter | Command::Space) | (_, Command::P) => {
                return Some(Screen::Game(self.play()))
            }
            (Selection::PlayButton, Command::Up | Command::Prev) => {
                self.select(Selection::QuitButton, None);
            }
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.select(Selection::Settings, Some(true));
            }
            (Selection::Settings, Command::Up | Command::Prev) => {
                if let Some(sel) = self.settings.move_up() {
                    self.select(sel, None);
                }
            }
            (Selection::Settings, Command::Down | Command::Next) => {
                if let Some(sel) = self.settings.move_down() {
                    self.select(sel, None);
                }
            }
            (Selection::Settings, Command::Left) => self.settings.adjust(SettingValue::decrease),
            (Selection::Settings, Command::Right) => self.settings.adjust(SettingValue::increase),
            (Selection::Settings, Command::Space | Command::Enter) => {
                self.settings.adjust(SettingValue::toggle);
            }
            (Selection::QuitButton, Command::Enter | Command::Space) | (_, Command::Q) => {
                return Some(Screen::Quit);
            }
            (Selection::QuitButton, Command::Down | Command::Next) => {
                self.select(Selection::PlayButton, None);
            }
            (Selection::QuitButton, Command::Up | Command::Prev) => {
                self.select(Selection::Settings, Some(false));
            }
            _ => (),
        }
        None
    }

    fn play(&mut self) -> Game {
        self.globals.settings = self.settings.to_settings();
        Game::new(self.globals.clone())
    }

    fn select(&mut self, selection: Selection, first_setting: Option<bool>) {
        self.selection = selection;
        self.settings.selection = match (selection, first_setting) {
            (Selection::Settings, Some(true)) => Some(SettingKey::min()),
            (Selection::Settings, Some(false)) => Some(SettingKey::max()),
            _ => None,
        };
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, settings_area, record_area, quit_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                SettingsMenu::HEIGHT,
                1,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play", "p", self.selection == Selection::PlayButton).render(play_area, buf);

        let [settings_area] = Layout::horizontal([SettingsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(settings_area);
        (&self.settings).render(settings_area, buf);

        Line::from(format!("High Score: {}", self.high_score))
            .centered()
            .render(record_area, buf);

        button("Quit", "q", self.selection == Selection::QuitButton).render(quit_area, buf);
    }
}

/// A centered `[Label (k)]` button
fn button(label: &'static str, key: &'static str, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled(format!("[{label} ("), style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Settings,
    QuitButton,
}

/// The form for adjusting [`GameSettings`] before starting a game
#[derive(Clone, Debug, Eq, PartialEq)]
struct SettingsMenu {
    /// `Some(key)` while the main menu's selection is inside this form
    selection: Option<SettingKey>,
    values: EnumMap<SettingKey, SettingValue>,
}

impl SettingsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (SettingKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1;
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + SettingKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + SettingValue::DISPLAY_WIDTH;

    fn new(settings: GameSettings) -> Self {
        let values = EnumMap::from_fn(|key| settings.get(key));
        SettingsMenu {
            selection: None,
            values,
        }
    }

    fn to_settings(&self) -> GameSettings {
        let mut settings = GameSettings::default();
        for (key, &value) in &self.values {
            settings.set(key, value);
        }
        settings
    }

    fn move_up(&mut self) -> Option<Selection> {
        self.selection = self.selection?.prev();
        self.selection.is_none().then_some(Selection::PlayButton)
    }

    fn move_down(&mut self) -> Option<Selection> {
        self.selection = self.selection?.next();
        self.selection.is_none().then_some(Selection::QuitButton)
    }

    fn adjust(&mut self, f: fn(&mut SettingValue)) {
        if let Some(sel) = self.selection {
            f(&mut self.values[sel]);
        }
    }
}

impl Widget for &SettingsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Settings: ")
            .padding(Padding::horizontal(SettingsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in self.values.iter().zip(menu_area.rows()) {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(SettingsMenu::POINTER_WIDTH),
                lwidth = usize::from(SettingKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(SettingsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}
