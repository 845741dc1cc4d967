//! GUI module - User interface components

mod app;
mod data_view;
mod home;
mod plots;
mod predict;

pub use app::CarPriceApp;
