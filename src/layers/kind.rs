//! Layer kinds and their parameter tables

use std::fmt;

use serde::{Deserialize, Serialize};

use super::params::{ParamDefault as D, ParamDescriptor as P, Rgb};

/// Closed set of layer kinds known to the file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Aggregate,
    Trw,
    Coord,
    GeoRef,
    Gps,
    Map,
    Dem,
}

/// How a container kind acquires children while a file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// A fresh child is constructed for every `~Layer` line.
    Construct,
    /// The container owns a fixed set of children and hands them out in order.
    Prebuilt,
}

impl LayerKind {
    pub const ALL: [LayerKind; 7] = [
        LayerKind::Aggregate,
        LayerKind::Trw,
        LayerKind::Coord,
        LayerKind::GeoRef,
        LayerKind::Gps,
        LayerKind::Map,
        LayerKind::Dem,
    ];

    /// Name written after `~Layer`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LayerKind::Aggregate => "Aggregate",
            LayerKind::Trw => "TRW",
            LayerKind::Coord => "Coord",
            LayerKind::GeoRef => "GeoRef",
            LayerKind::Gps => "GPS",
            LayerKind::Map => "Map",
            LayerKind::Dem => "DEM",
        }
    }

    /// Resolve a `~Layer` argument. Case-insensitive; accepts older aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("TrackWaypoint") {
            return Some(LayerKind::Trw);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.wire_name().eq_ignore_ascii_case(name))
    }

    pub fn containment(&self) -> Option<Containment> {
        match self {
            LayerKind::Aggregate => Some(Containment::Construct),
            LayerKind::Gps => Some(Containment::Prebuilt),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.containment().is_some()
    }

    pub fn descriptors(&self) -> &'static [P] {
        match self {
            LayerKind::Aggregate => &[],
            LayerKind::Trw => TRW_PARAMS,
            LayerKind::Coord => COORD_PARAMS,
            LayerKind::GeoRef => GEOREF_PARAMS,
            LayerKind::Gps => GPS_PARAMS,
            LayerKind::Map => MAP_PARAMS,
            LayerKind::Dem => DEM_PARAMS,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

const TRW_PARAMS: &[P] = &[
    P::new(0, "tracks_visible", D::Boolean(true)),
    P::new(1, "waypoints_visible", D::Boolean(true)),
    P::new(2, "routes_visible", D::Boolean(true)),
    P::new(3, "drawmode", D::Enumeration(0)),
    P::new(4, "trackcolor", D::Color(Rgb::new(0, 0, 0))),
    P::new(5, "drawlines", D::Boolean(true)),
    P::new(6, "line_thickness", D::Int(1)),
    P::new(7, "drawpoints", D::Boolean(true)),
    P::new(8, "wpcolor", D::Color(Rgb::new(0, 0, 0))),
    P::new(9, "wpsymbol", D::Enumeration(0)),
    P::new(10, "wpsize", D::Int(4)),
    P::new(11, "velocity_min", D::Double(0.0)),
    P::new(12, "velocity_max", D::Double(85.0)),
];

const COORD_PARAMS: &[P] = &[
    P::new(0, "color", D::Color(Rgb::new(0, 0, 0))),
    P::new(1, "min_inc", D::Double(1.0)),
    P::new(2, "line_thickness", D::Int(3)),
];

const GEOREF_PARAMS: &[P] = &[
    P::new(0, "image", D::String("")),
    P::new(1, "corner_easting", D::Double(0.0)),
    P::new(2, "corner_northing", D::Double(0.0)),
    P::new(3, "mpp_easting", D::Double(4.0)),
    P::new(4, "mpp_northing", D::Double(4.0)),
    P::new(5, "alpha", D::Int(255)),
];

const GPS_PARAMS: &[P] = &[
    P::new(0, "gps_protocol", D::String("garmin")),
    P::new(1, "gps_port", D::String("usb:")),
    P::new(2, "gps_download_tracks", D::Boolean(true)),
    P::new(3, "gps_download_waypoints", D::Boolean(true)),
    P::new(4, "gps_upload_tracks", D::Boolean(true)),
    P::new(5, "gps_upload_waypoints", D::Boolean(true)),
];

const MAP_PARAMS: &[P] = &[
    P::new(0, "mode", D::Enumeration(13)),
    P::new(1, "directory", D::String("")),
    P::new(2, "alpha", D::Int(255)),
    P::new(3, "autodownload", D::Boolean(true)),
    P::new(4, "adlonlyifmissing", D::Boolean(false)),
    P::new(5, "mapzoom", D::Enumeration(0)),
];

const DEM_PARAMS: &[P] = &[
    P::new(0, "files", D::EmptyList),
    P::new(1, "color", D::Color(Rgb::new(0, 0, 255))),
    P::new(2, "source", D::Enumeration(0)),
    P::new(3, "type", D::Enumeration(0)),
    P::new(4, "min_elev", D::Double(0.0)),
    P::new(5, "max_elev", D::Double(1000.0)),
    P::new(6, "line_thickness", D::Int(3)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::params::ParamType;

    #[test]
    fn test_from_name_round_trips_wire_names() {
        for kind in LayerKind::ALL {
            assert_eq!(LayerKind::from_name(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive_and_accepts_alias() {
        assert_eq!(LayerKind::from_name("trw"), Some(LayerKind::Trw));
        assert_eq!(LayerKind::from_name("TrackWaypoint"), Some(LayerKind::Trw));
        assert_eq!(LayerKind::from_name("gps"), Some(LayerKind::Gps));
        assert_eq!(LayerKind::from_name("Foo"), None);
        assert_eq!(LayerKind::from_name(""), None);
    }

    #[test]
    fn test_only_aggregate_and_gps_contain() {
        assert_eq!(
            LayerKind::Aggregate.containment(),
            Some(Containment::Construct)
        );
        assert_eq!(LayerKind::Gps.containment(), Some(Containment::Prebuilt));
        assert!(!LayerKind::Trw.is_container());
        assert!(!LayerKind::Dem.is_container());
    }

    #[test]
    fn test_descriptor_ids_are_dense_and_names_unique() {
        for kind in LayerKind::ALL {
            let table = kind.descriptors();
            for (index, desc) in table.iter().enumerate() {
                assert_eq!(desc.id as usize, index, "{kind} id gap at {}", desc.name);
                let dupes = table
                    .iter()
                    .filter(|d| d.name.eq_ignore_ascii_case(desc.name))
                    .count();
                assert_eq!(dupes, 1, "{kind} repeats {}", desc.name);
            }
        }
    }

    #[test]
    fn test_dem_files_is_a_string_list() {
        let files = &LayerKind::Dem.descriptors()[0];
        assert_eq!(files.name, "files");
        assert_eq!(files.param_type, ParamType::StringList);
    }
}
