// DOM ids and preview styling used by the web frontend.

// Elements
pub const CANVAS_ID: &str = "builder-canvas";
pub const INFO_PANEL_ID: &str = "info-panel";
pub const VEHICLE_PICKER_ID: &str = "vehicle-picker";
pub const DELETE_BUTTON_ID: &str = "delete";
pub const SAVE_BUTTON_ID: &str = "save";
pub const RESET_BUTTON_ID: &str = "reset";
pub const EXPORT_BUTTON_ID: &str = "export";
pub const MODE_BUTTON_IDS: [(&str, builder_core::GizmoMode); 3] = [
    ("mode-translate", builder_core::GizmoMode::Translate),
    ("mode-rotate", builder_core::GizmoMode::Rotate),
    ("mode-scale", builder_core::GizmoMode::Scale),
];

// Data attributes carrying ids on toolbar buttons
pub const CATALOG_ATTR: &str = "data-catalog";
pub const VEHICLE_ATTR: &str = "data-vehicle";

// Export
pub const EXPORT_MIME: &str = "image/png";
pub const EXPORT_FILE_NAME: &str = "van.png";

// Preview styling
pub const BACKGROUND_COLOR: &str = "#10141c";
pub const BACKDROP_COLOR: &str = "rgba(160, 170, 185, 0.55)";
pub const SELECTED_COLOR: &str = "#ffd24a";
pub const GIZMO_AXIS_COLORS: [&str; 3] = ["#e5484d", "#46a758", "#3e63dd"];
pub const GIZMO_AXIS_LENGTH: f32 = 0.6; // world units
pub const LINE_WIDTH_PX: f64 = 1.5;
pub const SELECTED_LINE_WIDTH_PX: f64 = 2.5;
pub const LABEL_FONT: &str = "13px system-ui";

// Input
pub const WHEEL_PIXELS_PER_NOTCH: f64 = 100.0;
pub const WHEEL_LINES_PER_NOTCH: f64 = 3.0;
