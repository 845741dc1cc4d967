//! View Data Page
//! Striped grid of the prepared rows plus per-column summary statistics.

use crate::data::{PreparedTable, FINAL_COLUMNS};
use crate::stats::{summarize_table, ColumnSummary};
use egui::{RichText, ScrollArea};

#[derive(Default)]
pub struct DataViewPage {
    summaries: Option<Vec<ColumnSummary>>,
}

impl DataViewPage {
    /// Drop state derived from a previous table.
    pub fn reset(&mut self) {
        self.summaries = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, table: &PreparedTable) {
        ui.heading("View Data");
        if table.is_empty() {
            ui.label("The prepared table has no rows.");
            return;
        }
        ui.label(format!(
            "{} rows × {} columns",
            table.len(),
            FINAL_COLUMNS.len()
        ));
        ui.add_space(8.0);

        let summaries = self
            .summaries
            .get_or_insert_with(|| summarize_table(table));

        ui.label(RichText::new("Column Summary").size(14.0).strong());
        ui.add_space(4.0);
        Self::draw_summary_table(ui, summaries);

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        ui.label(RichText::new("Prepared Rows").size(14.0).strong());
        ui.add_space(4.0);
        Self::draw_rows(ui, table);
    }

    fn draw_summary_table(ui: &mut egui::Ui, summaries: &[ColumnSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("column_summary")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").strong().size(11.0));
                        ui.label(RichText::new("N").strong().size(11.0));
                        ui.label(RichText::new("Mean").strong().size(11.0));
                        ui.label(RichText::new("Median").strong().size(11.0));
                        ui.label(RichText::new("Std").strong().size(11.0));
                        ui.label(RichText::new("P95").strong().size(11.0));
                        ui.label(RichText::new("P05").strong().size(11.0));
                        ui.end_row();

                        for s in summaries {
                            ui.label(RichText::new(&s.column).size(11.0));
                            ui.label(RichText::new(s.count.to_string()).size(11.0));
                            ui.label(RichText::new(format!("{:.3}", s.mean)).size(11.0));
                            ui.label(RichText::new(format!("{:.3}", s.median)).size(11.0));
                            ui.label(RichText::new(format!("{:.3}", s.std)).size(11.0));
                            ui.label(RichText::new(format!("{:.3}", s.p95)).size(11.0));
                            ui.label(RichText::new(format!("{:.3}", s.p05)).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_rows(ui: &mut egui::Ui, table: &PreparedTable) {
        ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("prepared_rows")
                .striped(true)
                .min_col_width(85.0)
                .spacing([10.0, 2.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("#").strong().size(11.0));
                    for name in FINAL_COLUMNS {
                        ui.label(RichText::new(name).strong().size(11.0));
                    }
                    ui.end_row();

                    for i in 0..table.len() {
                        ui.label(RichText::new((i + 1).to_string()).size(11.0));
                        ui.label(RichText::new(format!("{:.1}", table.carwidth[i])).size(11.0));
                        ui.label(RichText::new(format!("{:.0}", table.enginesize[i])).size(11.0));
                        ui.label(RichText::new(format!("{:.0}", table.horsepower[i])).size(11.0));
                        ui.label(RichText::new(table.drivewheel_fwd[i].to_string()).size(11.0));
                        ui.label(
                            RichText::new(table.car_company_buick[i].to_string()).size(11.0),
                        );
                        ui.label(RichText::new(format!("{:.2}", table.price[i])).size(11.0));
                        ui.end_row();
                    }
                });
        });
    }
}
