//! The row of LED indicators.

use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};
use shared::{LedColor, LedIndex, LED_COUNT};

use crate::controller::reducer::GameState;

pub const LED_DIAMETER: f32 = 25.0;
pub const LED_SPACING: f32 = 10.0;
pub const STRIP_MARGIN: f32 = 10.0;
pub const STRIP_MIN_HEIGHT: f32 = 60.0;
const OUTLINE: Stroke = Stroke {
    width: 1.0,
    color: Color32::BLACK,
};

/// Width covering every LED plus the margin on both sides.
pub fn strip_width() -> f32 {
    let count = LED_COUNT as f32;
    count * LED_DIAMETER + (count - 1.0) * LED_SPACING + 2.0 * STRIP_MARGIN
}

/// Bounding square of `index`, vertically centered in an area of `area_height` starting at `origin`.
pub fn led_rect(origin: Pos2, area_height: f32, index: LedIndex) -> Rect {
    let x = origin.x + STRIP_MARGIN + index.get() as f32 * (LED_DIAMETER + LED_SPACING);
    let y = origin.y + area_height / 2.0 - LED_DIAMETER / 2.0;
    Rect::from_min_size(egui::pos2(x, y), Vec2::splat(LED_DIAMETER))
}

pub fn fill_color(color: LedColor) -> Color32 {
    let [r, g, b] = color.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn paint_led_strip(ui: &mut egui::Ui, state: &GameState) {
    let desired = egui::vec2(
        strip_width().max(ui.available_width()),
        STRIP_MIN_HEIGHT.max(ui.available_height()),
    );
    let (rect, _response) = ui.allocate_exact_size(desired, Sense::hover());
    let painter = ui.painter_at(rect);

    for index in LedIndex::all() {
        let led = led_rect(rect.min, rect.height(), index);
        painter.circle(
            led.center(),
            LED_DIAMETER / 2.0,
            fill_color(state.color_at(index)),
            OUTLINE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leds_are_evenly_spaced_from_the_left_margin() {
        let origin = egui::pos2(0.0, 0.0);
        let first = led_rect(origin, 60.0, LedIndex::new(0).expect("index"));
        let second = led_rect(origin, 60.0, LedIndex::new(1).expect("index"));
        let last = led_rect(origin, 60.0, LedIndex::new(14).expect("index"));

        assert_eq!(first.min, egui::pos2(10.0, 17.5));
        assert_eq!(second.min.x - first.min.x, LED_DIAMETER + LED_SPACING);
        assert_eq!(last.max.x + STRIP_MARGIN, strip_width());
        assert_eq!(first.width(), LED_DIAMETER);
    }

    #[test]
    fn leds_follow_the_area_origin() {
        let rect = led_rect(egui::pos2(100.0, 40.0), 100.0, LedIndex::new(2).expect("index"));
        assert_eq!(rect.min, egui::pos2(180.0, 77.5));
    }

    #[test]
    fn fill_colors_match_the_indicator_palette() {
        assert_eq!(fill_color(LedColor::Red), Color32::from_rgb(255, 0, 0));
        assert_eq!(fill_color(LedColor::Green), Color32::from_rgb(0, 255, 0));
        assert_eq!(fill_color(LedColor::Gray), Color32::from_rgb(128, 128, 128));
    }
}
