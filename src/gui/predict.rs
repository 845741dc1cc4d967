//! Predict Page
//! Fits the OLS price model on the prepared table and scores user input.

use crate::data::{canonical_company, PreparedTable};
use crate::stats::{ModelError, PriceModel};
use egui::{Color32, RichText};

/// Drive wheel choices offered for inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriveWheel {
    Fwd,
    Rwd,
    FourWd,
}

impl DriveWheel {
    fn label(self) -> &'static str {
        match self {
            DriveWheel::Fwd => "fwd",
            DriveWheel::Rwd => "rwd",
            DriveWheel::FourWd => "4wd",
        }
    }
}

pub struct PredictPage {
    carwidth: f64,
    enginesize: f64,
    horsepower: f64,
    drivewheel: DriveWheel,
    company: String,
    model: Option<Result<PriceModel, ModelError>>,
}

impl Default for PredictPage {
    fn default() -> Self {
        Self {
            carwidth: 65.0,
            enginesize: 120.0,
            horsepower: 100.0,
            drivewheel: DriveWheel::Fwd,
            company: "toyota".to_string(),
            model: None,
        }
    }
}

impl PredictPage {
    /// Drop the fitted model so it is refitted against a new table.
    pub fn reset(&mut self) {
        self.model = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, table: &PreparedTable) {
        ui.heading("Predict");
        ui.add_space(8.0);

        let model = self
            .model
            .get_or_insert_with(|| PriceModel::fit(table));

        let model = match model {
            Ok(model) => model,
            Err(e) => {
                ui.label(
                    RichText::new(format!("Model unavailable: {e}"))
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                return;
            }
        };

        let label_width = 110.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Car width:"));
            ui.add(
                egui::DragValue::new(&mut self.carwidth)
                    .speed(0.1)
                    .range(50.0..=80.0),
            );
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Engine size:"));
            ui.add(
                egui::DragValue::new(&mut self.enginesize)
                    .speed(1.0)
                    .range(50.0..=400.0),
            );
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Horsepower:"));
            ui.add(
                egui::DragValue::new(&mut self.horsepower)
                    .speed(1.0)
                    .range(40.0..=300.0),
            );
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Drive wheel:"));
            for dw in [DriveWheel::Fwd, DriveWheel::Rwd, DriveWheel::FourWd] {
                ui.radio_value(&mut self.drivewheel, dw, dw.label());
            }
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Manufacturer:"));
            ui.text_edit_singleline(&mut self.company);
        });

        // Manufacturer goes through the same spelling correction as the
        // dataset, so e.g. "vw" and "toyouta" are recognized.
        let company = canonical_company(self.company.trim()).to_string();
        let is_buick = company == "buick";
        let is_fwd = self.drivewheel == DriveWheel::Fwd;

        let price = model.predict([
            self.carwidth,
            self.enginesize,
            self.horsepower,
            f64::from(u8::from(is_fwd)),
            f64::from(u8::from(is_buick)),
        ]);

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        ui.label(RichText::new("Estimated price").size(14.0).strong());
        ui.label(
            RichText::new(format!("${price:.0}"))
                .size(30.0)
                .color(Color32::from_rgb(40, 167, 69)),
        );
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!(
                "Fitted on {} rows, training R² = {:.3}",
                model.n_rows(),
                model.r_squared()
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
        if company != self.company.trim() {
            ui.label(
                RichText::new(format!("Manufacturer read as \"{company}\""))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(8.0);
        ui.collapsing("Model details", |ui| {
            let names = ["carwidth", "enginesize", "horsepower", "fwd", "buick"];
            ui.label(
                RichText::new(format!("intercept = {:.2}", model.intercept())).size(11.0),
            );
            for (name, coef) in names.iter().zip(model.coefficients().iter()) {
                ui.label(RichText::new(format!("{name} = {coef:+.2}")).size(11.0));
            }
        });
    }
}
