pub mod panel;
pub mod readout;
pub mod scope_view;
pub mod state;

pub use scope_view::ScopeView;
pub use state::SnapshotSlot;

/// Convert a renderer color to an egui color.
pub(crate) fn color32(colour: dso_core::settings::Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (colour[0] * 255.0).round() as u8,
        (colour[1] * 255.0).round() as u8,
        (colour[2] * 255.0).round() as u8,
        (colour[3] * 255.0).round() as u8,
    )
}
