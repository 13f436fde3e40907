use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::slot_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Comparison plot (central panel)
// ---------------------------------------------------------------------------

/// Render the merged comparison chart in the central panel.
///
/// The x axis is the frame entry's rank rather than the raw frequency, so a
/// log-like sweep fills the width evenly; tick and hover labels map ranks
/// back to the entry's frequency in Hz.
pub fn comparison_plot(ui: &mut Ui, state: &AppState) {
    let frame = state.frame();
    if frame.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open sweep files to compare  (File → Open…)");
        });
        return;
    }

    // rank → frequency lookups captured by the axis and hover formatters
    let tick_labels: Vec<String> = frame.iter().map(|e| format_hz(e.frequency)).collect();
    let frequencies: Vec<f64> = frame.iter().map(|e| e.frequency).collect();

    let measurement: Vec<[f64; 2]> = frame
        .iter()
        .filter_map(|e| e.magnitude.map(|m| [e.index as f64, m]))
        .collect();
    let baseline: Vec<[f64; 2]> = frame
        .iter()
        .filter_map(|e| e.magnitude2.map(|m| [e.index as f64, m]))
        .collect();

    // Legend names: the slot file names without the .csv suffix.
    let names: Vec<String> = state
        .slots
        .iter()
        .map(|s| s.trim_end_matches(".csv").to_string())
        .collect();

    Plot::new("comparison_plot")
        .legend(Legend::default())
        .x_axis_label("Frequency")
        .y_axis_label("Magnitude (dB)")
        .x_axis_formatter(move |mark, _range| {
            let rank = mark.value.round();
            if (mark.value - rank).abs() > 1e-9 || rank < 0.0 {
                return String::new();
            }
            tick_labels.get(rank as usize).cloned().unwrap_or_default()
        })
        .label_formatter(move |name, value| {
            let rank = value.x.round();
            let frequency = (rank >= 0.0)
                .then(|| frequencies.get(rank as usize))
                .flatten();
            match frequency {
                Some(f) => format!("{name}\nFrequency: {f} Hz\n{:.2} dB", value.y),
                None => format!("{name}\n{:.2} dB", value.y),
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (slot, points) in [measurement, baseline].into_iter().enumerate() {
                if points.is_empty() {
                    continue;
                }
                let name = names
                    .get(slot)
                    .cloned()
                    .unwrap_or_else(|| format!("slot {slot}"));
                let line = Line::new(PlotPoints::from(points))
                    .name(&name)
                    .color(slot_color(slot))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

/// Compact Hz tick label: 20, 1.5k, 1.0M.
fn format_hz(frequency: f64) -> String {
    if frequency >= 1_000_000.0 {
        format!("{:.1}M", frequency / 1_000_000.0)
    } else if frequency >= 1000.0 {
        format!("{:.1}k", frequency / 1000.0)
    } else {
        format!("{frequency:.0}")
    }
}
