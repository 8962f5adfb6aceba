//! Whole-file header: format version, view state and root visibility

use std::io::{self, BufRead, Write};

use super::codec::{decode_bool, decode_color, encode_bool, encode_f64, parse_f64_lenient};
use super::lines::{LineReader, LineSource};
use super::status::{ParseErrorKind, StatusLog};
use super::VIK_FILE_VERSION;
use crate::layers::LayerNode;
use crate::view::{ViewMode, ViewState};

/// What the header contributed besides direct view-state updates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeaderInfo {
    pub file_version: Option<i32>,
    /// `(lat, lon)`, present only when both keys held valid numbers.
    pub center: Option<(f64, f64)>,
}

/// Read header lines up to the first `~` line, which is pushed back.
pub fn read_header<R: BufRead>(
    lines: &mut LineReader<R>,
    root: &mut LayerNode,
    view: &mut dyn ViewState,
    status: &mut StatusLog,
) -> io::Result<HeaderInfo> {
    let mut info = HeaderInfo::default();
    let mut lat = None;
    let mut lon = None;

    while let Some(line) = lines.next_line()? {
        if line.starts_with('~') {
            lines.push_back(line);
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_no = lines.line_number();
        let Some((key, value)) = line.split_once('=') else {
            status.record(
                line_no,
                ParseErrorKind::Header,
                format!("Invalid header line: {}", line),
            );
            continue;
        };

        match key {
            "FILE_VERSION" => {
                let version = value.trim().parse::<i32>().unwrap_or(0);
                info.file_version = Some(version);
                if version > VIK_FILE_VERSION {
                    status.record(
                        line_no,
                        ParseErrorKind::FormatVersion,
                        format!(
                            "File version {} is newer than supported version {}",
                            version, VIK_FILE_VERSION
                        ),
                    );
                }
            }
            "xmpp" => {
                let (_, ympp) = view.scale();
                view.set_scale(parse_f64_lenient(value), ympp);
            }
            "ympp" => {
                let (xmpp, _) = view.scale();
                view.set_scale(xmpp, parse_f64_lenient(value));
            }
            "lat" => lat = parse_coordinate(value, key, line_no, status),
            "lon" => lon = parse_coordinate(value, key, line_no, status),
            "mode" => match ViewMode::from_name(value) {
                Some(mode) => view.set_mode(mode),
                None => status.record(
                    line_no,
                    ParseErrorKind::Header,
                    format!("Unknown view mode '{}'", value),
                ),
            },
            "color" => view.set_background_color(decode_color(value)),
            "highlightcolor" => view.set_highlight_color(decode_color(value)),
            "drawscale" => view.set_draw_scale(decode_bool(value)),
            "drawcentermark" => view.set_draw_center_mark(decode_bool(value)),
            "drawhighlight" => view.set_draw_highlight(decode_bool(value)),
            "visible" => root.set_visible(decode_bool(value)),
            _ => status.record(
                line_no,
                ParseErrorKind::Header,
                format!("Unknown header key '{}'", key),
            ),
        }
    }

    if let (Some(lat), Some(lon)) = (lat, lon) {
        info.center = Some((lat, lon));
    }
    Ok(info)
}

fn parse_coordinate(value: &str, key: &str, line: usize, status: &mut StatusLog) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            status.record(
                line,
                ParseErrorKind::Header,
                format!("Invalid {} value '{}'", key, value),
            );
            None
        }
    }
}

/// Write the header. Keys always appear, in a fixed order.
pub fn write_header(
    out: &mut dyn Write,
    root: &LayerNode,
    view: &dyn ViewState,
) -> io::Result<()> {
    let (xmpp, ympp) = view.scale();
    let (lat, lon) = view.center();

    writeln!(out, "FILE_VERSION={}", VIK_FILE_VERSION)?;
    writeln!(out)?;
    writeln!(out, "xmpp={:.6}", xmpp)?;
    writeln!(out, "ympp={:.6}", ympp)?;
    writeln!(out, "lat={}", encode_f64(lat))?;
    writeln!(out, "lon={}", encode_f64(lon))?;
    writeln!(out, "mode={}", view.mode())?;
    writeln!(out, "color={}", view.background_color())?;
    writeln!(out, "highlightcolor={}", view.highlight_color())?;
    writeln!(out, "drawscale={}", encode_bool(view.draw_scale()))?;
    writeln!(out, "drawcentermark={}", encode_bool(view.draw_center_mark()))?;
    writeln!(out, "drawhighlight={}", encode_bool(view.draw_highlight()))?;
    if !root.is_visible() {
        writeln!(out, "visible=f")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::status::{ParseErrorKind, ParseStatus};
    use crate::layers::{LayerKind, Rgb};
    use crate::view::ViewSettings;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn read(input: &str) -> (HeaderInfo, LayerNode, ViewSettings, StatusLog, Option<String>) {
        let mut lines = LineReader::new(input.as_bytes());
        let mut root = LayerNode::new(LayerKind::Aggregate);
        let mut view = ViewSettings::default();
        let mut status = StatusLog::default();
        let info = read_header(&mut lines, &mut root, &mut view, &mut status).unwrap();
        let next = lines.next_line().unwrap();
        (info, root, view, status, next)
    }

    #[test]
    fn test_reads_all_keys() {
        let input = "#VIKING GPS Data file http://viking.sf.net/\n\
                     FILE_VERSION=1\n\
                     \n\
                     xmpp=2.500000\n\
                     ympp=3.000000\n\
                     lat=51.5\n\
                     lon=-0.125\n\
                     mode=utm\n\
                     color=#102030\n\
                     highlightcolor=red\n\
                     drawscale=f\n\
                     drawcentermark=t\n\
                     drawhighlight=f\n\
                     visible=f\n\
                     ~Layer Aggregate\n";
        let (info, root, view, status, next) = read(input);

        assert!(status.status().is_success());
        assert_eq!(info.file_version, Some(1));
        assert_eq!(info.center, Some((51.5, -0.125)));
        assert_relative_eq!(view.xmpp, 2.5);
        assert_relative_eq!(view.ympp, 3.0);
        assert_eq!(view.mode, ViewMode::Utm);
        assert_eq!(view.background_color, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(view.highlight_color, Rgb::new(255, 0, 0));
        assert!(!view.draw_scale);
        assert!(view.draw_center_mark);
        assert!(!view.draw_highlight);
        assert!(!root.is_visible());
        assert_eq!(next.as_deref(), Some("~Layer Aggregate"));
    }

    #[test]
    fn test_center_needs_both_coordinates() {
        let (info, ..) = read("lat=10.0\n");
        assert_eq!(info.center, None);

        let (info, _, _, status, _) = read("lat=10.0\nlon=oops\n");
        assert_eq!(info.center, None);
        assert_eq!(
            status.status().error().map(|e| e.kind),
            Some(ParseErrorKind::Header)
        );
    }

    #[test]
    fn test_newer_version_is_not_fatal() {
        let (info, _, view, status, _) = read("FILE_VERSION=99\nlat=1\nlon=2\nmode=latlon\n");

        let err = status.status().error().unwrap();
        assert_eq!(err.kind, ParseErrorKind::FormatVersion);
        assert_eq!(err.line, 1);
        assert_eq!(info.center, Some((1.0, 2.0)));
        assert_eq!(view.mode, ViewMode::LatLon);
    }

    #[test]
    fn test_unknown_key_and_mode_are_reported() {
        let (_, _, view, status, _) = read("mode=gnomonic\nzoom=3\nxmpp=8\n");
        assert_eq!(status.errors().len(), 2);
        assert_eq!(status.errors()[0].line, 1);
        assert_eq!(status.errors()[1].message, "Unknown header key 'zoom'");
        assert_eq!(view.mode, ViewMode::Mercator);
        assert_relative_eq!(view.xmpp, 8.0);
    }

    #[test]
    fn test_empty_input() {
        let (info, _, _, status, next) = read("");
        assert_eq!(info, HeaderInfo::default());
        assert_eq!(*status.status(), ParseStatus::Success);
        assert_eq!(next, None);
    }

    #[test]
    fn test_write_fixed_order() {
        let mut root = LayerNode::new(LayerKind::Aggregate);
        let view = ViewSettings {
            xmpp: 1.0,
            ympp: 1.0,
            lat: 10.0,
            lon: 20.5,
            mode: ViewMode::Mercator,
            background_color: Rgb::new(255, 255, 255),
            highlight_color: Rgb::new(238, 215, 0),
            draw_scale: true,
            draw_center_mark: false,
            draw_highlight: true,
        };

        let mut out = Vec::new();
        write_header(&mut out, &root, &view).unwrap();
        let expected = "FILE_VERSION=1\n\
                        \n\
                        xmpp=1.000000\n\
                        ympp=1.000000\n\
                        lat=10\n\
                        lon=20.5\n\
                        mode=mercator\n\
                        color=#ffffff\n\
                        highlightcolor=#eed700\n\
                        drawscale=t\n\
                        drawcentermark=f\n\
                        drawhighlight=t\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);

        root.set_visible(false);
        let mut out = Vec::new();
        write_header(&mut out, &root, &view).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("drawhighlight=t\nvisible=f\n"));
    }
}
