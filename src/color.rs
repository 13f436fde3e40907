use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Trace colours
// ---------------------------------------------------------------------------

/// Colour for a comparison slot: slot 0 (the measurement) plots blue,
/// slot 1 (the baseline) red. Everything past the second slot falls back
/// to grey, though the store never holds that many.
pub fn slot_color(slot: usize) -> Color32 {
    let (hue, saturation, lightness) = match slot {
        0 => (217.0, 0.91, 0.60),
        1 => (0.0, 0.84, 0.60),
        _ => return Color32::GRAY,
    };
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
