//! Home Page
//! Landing page; requires no data.

use egui::{Color32, RichText};

pub fn show(ui: &mut egui::Ui) {
    ui.add_space(10.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("🚗 CarPrice Studio")
                .size(28.0)
                .color(Color32::from_rgb(100, 149, 237)),
        );
        ui.label(RichText::new("Car price exploration and prediction").size(13.0));
    });
    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    ui.label(
        "This dashboard loads a dataset of automobile listings, cleans it into a \
         six-column numeric feature table, and lets you browse the table, visualise \
         relationships between its columns, and estimate car prices.",
    );
    ui.add_space(8.0);
    ui.label(
        "Preparation extracts the manufacturer from each car name, corrects known \
         misspellings, converts word-encoded door and cylinder counts to numbers, and \
         one-hot encodes the remaining categorical fields. The final table keeps car \
         width, engine size, horsepower, a front-wheel-drive indicator, a Buick \
         indicator, and price.",
    );
    ui.add_space(8.0);
    ui.label("Pick a destination from the sidebar to get started.");
}
