//! Visualise Data Page
//! Interactive scatter of any two prepared columns with a fitted trend line.

use crate::charts::ChartExporter;
use crate::data::{PreparedTable, FINAL_COLUMNS};
use crate::stats::{pearson, trend_line, SIGNIFICANCE_THRESHOLD};
use egui::{Color32, ComboBox, RichText};
use egui_plot::{Line, Plot, PlotPoints, Points};

const SCATTER_COLOR: Color32 = Color32::from_rgb(52, 152, 219);
const TREND_COLOR: Color32 = Color32::from_rgb(231, 76, 60);

pub struct PlotsPage {
    x_col: String,
    y_col: String,
    status: String,
}

impl Default for PlotsPage {
    fn default() -> Self {
        Self {
            x_col: "horsepower".to_string(),
            y_col: "price".to_string(),
            status: String::new(),
        }
    }
}

impl PlotsPage {
    pub fn reset(&mut self) {
        self.status.clear();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, table: &PreparedTable) {
        ui.heading("Visualise Data");
        ui.add_space(8.0);

        let label_width = 70.0;
        let combo_width = 170.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("X axis:"));
            ComboBox::from_id_salt("plot_x_col")
                .width(combo_width)
                .selected_text(&self.x_col)
                .show_ui(ui, |ui| {
                    for col in FINAL_COLUMNS {
                        ui.selectable_value(&mut self.x_col, col.to_string(), col);
                    }
                });
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Y axis:"));
            ComboBox::from_id_salt("plot_y_col")
                .width(combo_width)
                .selected_text(&self.y_col)
                .show_ui(ui, |ui| {
                    for col in FINAL_COLUMNS {
                        ui.selectable_value(&mut self.y_col, col.to_string(), col);
                    }
                });
        });
        ui.add_space(8.0);

        let xs = table.column(&self.x_col).unwrap_or_default();
        let ys = table.column(&self.y_col).unwrap_or_default();

        let pairs: Vec<[f64; 2]> = xs
            .iter()
            .zip(ys.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| [x, y])
            .collect();
        let trend = trend_line(&xs, &ys);

        if let Some((r, p)) = pearson(&xs, &ys) {
            let color = if p <= SIGNIFICANCE_THRESHOLD {
                Color32::from_rgb(40, 167, 69)
            } else {
                ui.visuals().text_color()
            };
            ui.label(
                RichText::new(format!("Pearson r = {r:.3}, p = {p:.4}"))
                    .size(12.0)
                    .color(color),
            );
        } else {
            ui.label(RichText::new("Correlation unavailable for this pair").size(12.0));
        }
        ui.add_space(4.0);

        let x_label = self.x_col.clone();
        let y_label = self.y_col.clone();
        Plot::new("scatter_plot")
            .height(420.0)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let points: PlotPoints = pairs.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(2.5)
                        .color(SCATTER_COLOR.gamma_multiply(0.8))
                        .name("listings"),
                );

                if let Some((a, b)) = trend {
                    if let Some((x_min, x_max)) = span(pairs.iter().map(|p| p[0])) {
                        let line: PlotPoints =
                            vec![[x_min, a + b * x_min], [x_max, a + b * x_max]].into();
                        plot_ui.line(Line::new(line).color(TREND_COLOR).width(1.5).name("trend"));
                    }
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("💾 Export PNG").clicked() {
                self.export_chart(&pairs, trend);
            }
            if !self.status.is_empty() {
                let color = if self.status.contains("Error") {
                    Color32::from_rgb(220, 53, 69)
                } else {
                    Color32::from_rgb(40, 167, 69)
                };
                ui.label(RichText::new(&self.status).size(11.0).color(color));
            }
        });
    }

    fn export_chart(&mut self, pairs: &[[f64; 2]], trend: Option<(f64, f64)>) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}_vs_{}.png", self.y_col, self.x_col))
            .save_file()
        else {
            return; // User cancelled
        };

        let points: Vec<(f64, f64)> = pairs.iter().map(|p| (p[0], p[1])).collect();
        match ChartExporter::export_scatter(&path, &self.x_col, &self.y_col, &points, trend) {
            Ok(()) => {
                self.status = format!("Exported {}", path.display());
                if let Err(e) = open::that(&path) {
                    log::warn!("could not open exported chart: {e}");
                }
            }
            Err(e) => {
                self.status = format!("Error: {e}");
                log::error!("chart export failed: {e}");
            }
        }
    }
}

/// Min and max of an iterator of finite values.
fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min <= max).then_some((min, max))
}
