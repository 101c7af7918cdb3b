use crate::game::Game;
use crate::highscore::FileStore;
use crate::menu::MainMenu;
use crate::settings::GameSettings;
use log::debug;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        App {
            screen: Screen::Main(MainMenu::new(globals)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        debug!("Quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| menu.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            debug!("Switching to {} screen", screen.name());
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Game),
    Quit,
}

impl Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::Main(_) => "main menu",
            Screen::Game(_) => "game",
            Screen::Quit => "quit",
        }
    }
}

/// State carried from screen to screen for the whole session
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Globals {
    /// The settings last chosen in the main menu
    pub(crate) settings: GameSettings,
    pub(crate) store: FileStore,
}
