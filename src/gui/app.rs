//! CarPrice Studio Main Application
//! Sidebar navigation over the four pages; the central panel renders the
//! active one. Holds the session cache for the prepared table.

use crate::config::AppConfig;
use crate::data::{PrepareError, PreparedCache};
use crate::gui::data_view::DataViewPage;
use crate::gui::home;
use crate::gui::plots::PlotsPage;
use crate::gui::predict::PredictPage;
use egui::{Color32, RichText, SidePanel};

/// Navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    ViewData,
    Visualise,
    Predict,
}

impl Page {
    const ALL: [Page; 4] = [Page::Home, Page::ViewData, Page::Visualise, Page::Predict];

    fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::ViewData => "View Data",
            Page::Visualise => "Visualise Data",
            Page::Predict => "Predict",
        }
    }
}

/// Main application window.
pub struct CarPriceApp {
    config: AppConfig,
    cache: PreparedCache,
    page: Page,
    data_view: DataViewPage,
    plots: PlotsPage,
    predict: PredictPage,
}

impl CarPriceApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let cache = PreparedCache::new(config.dataset_path.clone());
        Self {
            config,
            cache,
            page: Page::Home,
            data_view: DataViewPage::default(),
            plots: PlotsPage::default(),
            predict: PredictPage::default(),
        }
    }

    /// Handle dataset file selection.
    fn handle_browse(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.config.dataset_path = path.clone();
            if let Err(e) = self.config.save() {
                log::warn!("failed to save settings: {e}");
            }
            self.cache.set_path(path);
            self.reset_pages();
        }
    }

    /// Re-run the pipeline against the current path.
    fn handle_reload(&mut self) {
        self.cache.invalidate();
        self.reset_pages();
    }

    /// Drop page state derived from a previous table.
    fn reset_pages(&mut self) {
        self.data_view.reset();
        self.plots.reset();
        self.predict.reset();
    }

    fn draw_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚗 CarPrice Studio")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("🧭 Navigation").size(14.0).strong());
        ui.add_space(5.0);
        for page in Page::ALL {
            ui.radio_value(&mut self.page, page, page.label());
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        let mut browse = false;
        let mut reload = false;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .cache
                    .path()
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.cache.path().display().to_string());
                ui.label(RichText::new(path_text).size(12.0));

                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        browse = true;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        reload = true;
                    }
                });
            });
        if browse {
            self.handle_browse();
        }
        if reload {
            self.handle_reload();
        }

        ui.add_space(10.0);

        // ===== Status =====
        match self.cache.cached() {
            None => {
                ui.label(RichText::new("Not loaded yet").size(11.0).color(Color32::GRAY));
            }
            Some(Ok(table)) => {
                ui.label(
                    RichText::new(format!("{} rows ready", table.len()))
                        .size(11.0)
                        .color(Color32::from_rgb(40, 167, 69)),
                );
            }
            Some(Err(e)) => {
                ui.label(
                    RichText::new(e.to_string())
                        .size(11.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
        }
    }

    fn draw_error(ui: &mut egui::Ui, error: &PrepareError) {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("⚠ Dataset unavailable")
                    .size(18.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
            ui.add_space(8.0);
            ui.label(error.to_string());
            ui.add_space(8.0);
            if error.is_data_unavailable() {
                ui.label("Check the dataset path in the sidebar, then reload.");
            } else {
                ui.label(
                    "The dataset no longer matches the expected column layout; \
                     data pages cannot be shown.",
                );
            }
        });
    }
}

impl eframe::App for CarPriceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("navigation")
            .min_width(230.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_sidebar(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.page == Page::Home {
                home::show(ui);
                return;
            }

            // Data-dependent pages share the session cache; the pipeline
            // runs on first access and the result is reused afterwards.
            match self.cache.get_or_prepare() {
                Ok(table) => match self.page {
                    Page::ViewData => self.data_view.show(ui, &table),
                    Page::Visualise => self.plots.show(ui, &table),
                    Page::Predict => self.predict.show(ui, &table),
                    Page::Home => {}
                },
                Err(e) => Self::draw_error(ui, &e),
            }
        });
    }
}
