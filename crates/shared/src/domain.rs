/// Number of LEDs on the board.
pub const LED_COUNT: usize = 15;

/// Zero-based position of an LED on the strip, always below [`LED_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedIndex(u8);

impl LedIndex {
    pub fn new(index: usize) -> Option<Self> {
        (index < LED_COUNT).then(|| Self(index as u8))
    }

    /// Converts the board's 1-based position report.
    pub fn from_position(position: i64) -> Option<Self> {
        let index = position.checked_sub(1)?;
        usize::try_from(index).ok().and_then(Self::new)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    pub fn position(self) -> u8 {
        self.0 + 1
    }

    pub fn all() -> impl Iterator<Item = LedIndex> {
        (0..LED_COUNT as u8).map(LedIndex)
    }

    /// Color this LED shows while it is the lit one.
    pub fn lit_color(self) -> LedColor {
        let last = LED_COUNT - 1;
        match self.get() {
            i if i == 0 || i == last => LedColor::Red,
            i if i == 1 || i == last - 1 => LedColor::Yellow,
            _ => LedColor::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedColor {
    Red,
    Yellow,
    Green,
    Gray,
}

impl LedColor {
    /// Color of `index` given the currently lit LED.
    pub fn for_led(index: LedIndex, active: Option<LedIndex>) -> Self {
        match active {
            Some(active) if active == index => index.lit_color(),
            _ => LedColor::Gray,
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            LedColor::Red => [255, 0, 0],
            LedColor::Yellow => [255, 255, 0],
            LedColor::Green => [0, 255, 0],
            LedColor::Gray => [128, 128, 128],
        }
    }

    pub fn glyph(self) -> char {
        match self {
            LedColor::Red => 'R',
            LedColor::Yellow => 'Y',
            LedColor::Green => 'G',
            LedColor::Gray => '.',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_map_to_zero_based_indices() {
        assert_eq!(LedIndex::from_position(1).map(LedIndex::get), Some(0));
        assert_eq!(LedIndex::from_position(15).map(LedIndex::get), Some(14));
        assert_eq!(LedIndex::from_position(0), None);
        assert_eq!(LedIndex::from_position(16), None);
        assert_eq!(LedIndex::from_position(-3), None);
        assert_eq!(LedIndex::from_position(i64::MIN), None);
    }

    #[test]
    fn edge_leds_light_red_and_their_neighbours_yellow() {
        let colors: Vec<LedColor> = LedIndex::all().map(LedIndex::lit_color).collect();
        assert_eq!(colors.len(), LED_COUNT);
        assert_eq!(colors[0], LedColor::Red);
        assert_eq!(colors[14], LedColor::Red);
        assert_eq!(colors[1], LedColor::Yellow);
        assert_eq!(colors[13], LedColor::Yellow);
        assert!(colors[2..13].iter().all(|c| *c == LedColor::Green));
    }

    #[test]
    fn only_the_active_led_is_lit() {
        let active = LedIndex::new(7);
        for index in LedIndex::all() {
            let expected = if index.get() == 7 {
                LedColor::Green
            } else {
                LedColor::Gray
            };
            assert_eq!(LedColor::for_led(index, active), expected);
        }
        assert!(LedIndex::all().all(|i| LedColor::for_led(i, None) == LedColor::Gray));
    }
}
