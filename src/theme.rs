use serde::{Deserialize, Serialize};

/// Chart chrome palette: everything drawn around the annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub plot_background: String,
    pub frame_color: String,
    pub grid_color: String,
    pub tick_color: String,
    pub title_color: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            plot_background: "#F8FAFF".to_string(),
            frame_color: "#C7D2E5".to_string(),
            grid_color: "#E8EDF5".to_string(),
            tick_color: "#7A8AA6".to_string(),
            title_color: "#1C2430".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#12161D".to_string(),
            plot_background: "#171C25".to_string(),
            frame_color: "#39445A".to_string(),
            grid_color: "#242C3B".to_string(),
            tick_color: "#8B99B3".to_string(),
            title_color: "#E6EBF5".to_string(),
        }
    }
}
