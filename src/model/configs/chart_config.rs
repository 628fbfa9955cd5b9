use crate::common::*;

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ChartConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_x_tick_font_size")]
    pub x_tick_font_size: u32,
    #[serde(default)]
    pub viewer: Option<String>,
}

fn default_output_dir() -> String {
    String::from("./charts")
}

fn default_width() -> u32 {
    1400
}

fn default_height() -> u32 {
    700
}

fn default_x_tick_font_size() -> u32 {
    12
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            width: default_width(),
            height: default_height(),
            x_tick_font_size: default_x_tick_font_size(),
            viewer: None,
        }
    }
}

