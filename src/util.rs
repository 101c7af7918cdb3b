use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Extra navigation methods for fieldless enums, used for moving a selection
/// through menu items
pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Return the 80×24 (or smaller, if the terminal is tiny) area in the middle
/// of the terminal in which all screens are drawn
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered inside `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}
