use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const GRID_WIDTH: u16 = 20;
    const SNAKE_WIDTH: u16 = 28;
    pub(super) const HEIGHT: u16 = 5;
    pub(super) const WIDTH: u16 = Self::GRID_WIDTH + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const GRID: [&'static str; Self::HEIGHT as usize] = [
         "  ____      _     _ ",
         " / ___|_ __(_) __| |",
         "| |  _| '__| |/ _` |",
         "| |_| | |  | | (_| |",
        r" \____|_|  |_|\__,_|",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [grid_area, snake_area] = Layout::horizontal([Self::GRID_WIDTH, Self::SNAKE_WIDTH])
            .flex(Flex::Start)
            .areas(area);
        Text::from_iter(Self::GRID)
            .style(consts::FOOD_STYLE)
            .render(grid_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);
    }
}

/// The how-to-play blurb on the main menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 5;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let keys = |s: &'static str| Span::styled(s, consts::KEY_STYLE);
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            Line::from_iter([
                keys("←↓↑→"),
                Span::raw(" or "),
                keys("hjkl"),
                Span::raw(" or "),
                keys("wasd"),
            ]),
            Line::from_iter([
                Span::raw("Eat "),
                Span::styled(consts::FOOD_SYMBOL.to_string(), consts::FOOD_STYLE),
                Span::raw(" for 10 points"),
            ]),
            Line::from_iter([
                Span::raw("and catch "),
                Span::styled(consts::BONUS_SYMBOL.to_string(), consts::BONUS_STYLE),
                Span::raw(" for 50"),
            ]),
            Line::from("before it fades!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod logo {
        use super::*;

        #[test]
        fn test_render() {
            let mut buffer = Buffer::empty(Rect::new(0, 0, 52, 6));
            Logo.render(Rect::new(2, 1, Logo::WIDTH, Logo::HEIGHT), &mut buffer);
            #[rustfmt::skip]
            let mut expected = Buffer::with_lines([
                 "",
                 "    ____      _     _  ____              _          ",
                r"   / ___|_ __(_) __| |/ ___| _ __   __ _| | _____   ",
                r"  | |  _| '__| |/ _` |\___ \| '_ \ / _` | |/ / _ \  ",
                 "  | |_| | |  | | (_| | ___) | | | | (_| |   <  __/  ",
                r"   \____|_|  |_|\__,_||____/|_| |_|\__,_|_|\_\___|  ",
            ]);
            expected.set_style(Rect::new(2, 1, 20, 5), consts::FOOD_STYLE);
            expected.set_style(Rect::new(22, 1, 28, 5), consts::SNAKE_STYLE);
            pretty_assertions::assert_eq!(buffer, expected);
        }

        #[test]
        fn grid_width() {
            assert!(Logo::GRID
                .iter()
                .all(|ln| ln.len() == usize::from(Logo::GRID_WIDTH)));
        }

        #[test]
        fn snake_width() {
            assert!(Logo::SNAKE
                .iter()
                .all(|ln| ln.len() == usize::from(Logo::SNAKE_WIDTH)));
        }
    }

    mod instructions {
        use super::*;

        #[test]
        fn test_render() {
            let area = Rect::new(0, 0, Instructions::WIDTH, Instructions::HEIGHT);
            let mut buffer = Buffer::empty(area);
            Instructions.render(area, &mut buffer);
            let mut expected = Buffer::with_lines([
                "Move the snake with:",
                "←↓↑→ or hjkl or wasd",
                "Eat ● for 10 points",
                "and catch ★ for 50",
                "before it fades!",
            ]);
            expected.set_style(Rect::new(0, 1, 4, 1), consts::KEY_STYLE);
            expected.set_style(Rect::new(8, 1, 4, 1), consts::KEY_STYLE);
            expected.set_style(Rect::new(16, 1, 4, 1), consts::KEY_STYLE);
            expected.set_style(Rect::new(4, 2, 1, 1), consts::FOOD_STYLE);
            expected.set_style(Rect::new(10, 3, 1, 1), consts::BONUS_STYLE);
            pretty_assertions::assert_eq!(buffer, expected);
        }
    }
}
