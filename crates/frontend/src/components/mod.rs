pub mod alert_panel;
pub mod guideline_panel;
pub mod location_banner;
pub mod map_view;
