//! View state stored in the file header
//!
//! The viewer's viewport is an external collaborator. The header codec only
//! needs to get and set a handful of scalars, which [`ViewState`] exposes.
//! [`ViewSettings`] is a plain implementation for callers without a viewport.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layers::Rgb;

/// Map projection used by the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    Utm,
    Expedia,
    #[default]
    Mercator,
    LatLon,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Utm,
        ViewMode::Expedia,
        ViewMode::Mercator,
        ViewMode::LatLon,
    ];

    /// Name used by the `mode=` header key.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ViewMode::Utm => "utm",
            ViewMode::Expedia => "expedia",
            ViewMode::Mercator => "mercator",
            ViewMode::LatLon => "latlon",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.wire_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Access to the viewport scalars persisted in the header.
pub trait ViewState {
    /// Metres per pixel along x and y.
    fn scale(&self) -> (f64, f64);
    fn set_scale(&mut self, xmpp: f64, ympp: f64);

    /// Centre as (latitude, longitude) in degrees.
    fn center(&self) -> (f64, f64);
    fn set_center(&mut self, lat: f64, lon: f64);

    fn mode(&self) -> ViewMode;
    fn set_mode(&mut self, mode: ViewMode);

    fn background_color(&self) -> Rgb;
    fn set_background_color(&mut self, color: Rgb);

    fn highlight_color(&self) -> Rgb;
    fn set_highlight_color(&mut self, color: Rgb);

    fn draw_scale(&self) -> bool;
    fn set_draw_scale(&mut self, on: bool);

    fn draw_center_mark(&self) -> bool;
    fn set_draw_center_mark(&mut self, on: bool);

    fn draw_highlight(&self) -> bool;
    fn set_draw_highlight(&mut self, on: bool);
}

/// Plain-data [`ViewState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub xmpp: f64,
    pub ympp: f64,
    pub lat: f64,
    pub lon: f64,
    pub mode: ViewMode,
    pub background_color: Rgb,
    pub highlight_color: Rgb,
    pub draw_scale: bool,
    pub draw_center_mark: bool,
    pub draw_highlight: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            xmpp: 4.0,
            ympp: 4.0,
            lat: 0.0,
            lon: 0.0,
            mode: ViewMode::Mercator,
            background_color: Rgb::new(0xff, 0xff, 0xff),
            highlight_color: Rgb::new(0xee, 0xd7, 0x00),
            draw_scale: true,
            draw_center_mark: true,
            draw_highlight: true,
        }
    }
}

impl ViewState for ViewSettings {
    fn scale(&self) -> (f64, f64) {
        (self.xmpp, self.ympp)
    }

    fn set_scale(&mut self, xmpp: f64, ympp: f64) {
        self.xmpp = xmpp;
        self.ympp = ympp;
    }

    fn center(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    fn set_center(&mut self, lat: f64, lon: f64) {
        self.lat = lat;
        self.lon = lon;
    }

    fn mode(&self) -> ViewMode {
        self.mode
    }

    fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    fn background_color(&self) -> Rgb {
        self.background_color
    }

    fn set_background_color(&mut self, color: Rgb) {
        self.background_color = color;
    }

    fn highlight_color(&self) -> Rgb {
        self.highlight_color
    }

    fn set_highlight_color(&mut self, color: Rgb) {
        self.highlight_color = color;
    }

    fn draw_scale(&self) -> bool {
        self.draw_scale
    }

    fn set_draw_scale(&mut self, on: bool) {
        self.draw_scale = on;
    }

    fn draw_center_mark(&self) -> bool {
        self.draw_center_mark
    }

    fn set_draw_center_mark(&mut self, on: bool) {
        self.draw_center_mark = on;
    }

    fn draw_highlight(&self) -> bool {
        self.draw_highlight
    }

    fn set_draw_highlight(&mut self, on: bool) {
        self.draw_highlight = on;
    }
}
