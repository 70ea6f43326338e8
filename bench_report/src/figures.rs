//! Writing chart models to disk in the configured formats.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use plotly::Plot;

use bench_report_cli_types::FigureFormat;

/// Output formats and raster scale shared by all figures of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSettings {
    pub formats: Vec<FigureFormat>,
    pub scale: f64,
}

/// Default HTML template used for interactive figures.
/// Replicates the behavior of plotly.rs's to_html() while loading plotly.js from the CDN.
const DEFAULT_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{TITLE}}</title>
    {{PLOTLY_HEAD}}
</head>
<body>
    {{PLOTLY_BODY}}
</body>
</html>"#;

fn apply_template(template: &str, plot: &Plot, title: &str) -> Vec<u8> {
    let plotly_head = Plot::online_cdn_js();
    let plotly_body = plot.to_inline_html(None);

    template
        .replace("{{TITLE}}", title)
        .replace("{{PLOTLY_HEAD}}", &plotly_head)
        .replace("{{PLOTLY_BODY}}", &plotly_body)
        .into_bytes()
}

trait FigureWriter {
    fn write(&self, plot: &Plot, path: &Path, size: (usize, usize)) -> Result<()>;
}

struct HtmlWriter;

impl FigureWriter for HtmlWriter {
    fn write(&self, plot: &Plot, path: &Path, _size: (usize, usize)) -> Result<()> {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        File::create(path)
            .with_context(|| format!("Cannot create {}", path.display()))?
            .write_all(&apply_template(DEFAULT_HTML_TEMPLATE, plot, &title))
            .with_context(|| format!("Could not write {}", path.display()))
    }
}

#[cfg(feature = "static-export")]
struct StaticImageWriter {
    format: plotly::ImageFormat,
    scale: f64,
}

#[cfg(feature = "static-export")]
impl FigureWriter for StaticImageWriter {
    fn write(&self, plot: &Plot, path: &Path, size: (usize, usize)) -> Result<()> {
        plot.write_image(path, self.format.clone(), size.0, size.1, self.scale)
            .map_err(|e| anyhow::anyhow!("Failed to export {}: {}", path.display(), e))
    }
}

struct WriterFactory {}

impl WriterFactory {
    /// Writer for `format`, or `None` if this build cannot produce it.
    #[cfg(feature = "static-export")]
    fn from_format(format: FigureFormat, settings: &FigureSettings) -> Option<Box<dyn FigureWriter>> {
        use plotly::ImageFormat;
        let image_format = match format {
            FigureFormat::Html => return Some(Box::new(HtmlWriter) as Box<dyn FigureWriter>),
            FigureFormat::Png => ImageFormat::PNG,
            FigureFormat::Pdf => ImageFormat::PDF,
            FigureFormat::Svg => ImageFormat::SVG,
        };
        Some(Box::new(StaticImageWriter {
            format: image_format,
            scale: settings.scale,
        }) as Box<dyn FigureWriter>)
    }

    #[cfg(not(feature = "static-export"))]
    fn from_format(format: FigureFormat, _settings: &FigureSettings) -> Option<Box<dyn FigureWriter>> {
        if format.is_static() {
            None
        } else {
            Some(Box::new(HtmlWriter) as Box<dyn FigureWriter>)
        }
    }
}

/// Write `plot` as `<dir>/<stem>.<ext>` for every configured format.
///
/// Formats this build cannot produce are reported and replaced by a single
/// HTML file, unless HTML is already among the formats. Returns the paths
/// written, in format order.
pub fn write_figure(
    plot: &Plot,
    dir: &Path,
    stem: &str,
    size: (usize, usize),
    settings: &FigureSettings,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut needs_fallback = false;

    for format in &settings.formats {
        let path = dir.join(format!("{}.{}", stem, format.extension()));
        match WriterFactory::from_format(*format, settings) {
            Some(writer) => {
                writer.write(plot, &path, size)?;
                log::info!("Wrote {}", path.display());
                written.push(path);
            }
            None => {
                log::warn!(
                    "Cannot write {}: {} export requires building with the 'static-export' feature",
                    path.display(),
                    format.extension()
                );
                needs_fallback = true;
            }
        }
    }

    if needs_fallback && !settings.formats.contains(&FigureFormat::Html) {
        let path = dir.join(format!("{}.{}", stem, FigureFormat::Html.extension()));
        HtmlWriter.write(plot, &path, size)?;
        log::warn!("Wrote interactive {} instead", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_plot() -> Plot {
        let mut plot = Plot::new();
        plot.add_trace(plotly::Scatter::new(vec![1, 2, 3], vec![4, 5, 6]).name("test"));
        plot
    }

    #[test]
    fn test_apply_template() {
        let html = String::from_utf8(apply_template(
            DEFAULT_HTML_TEMPLATE,
            &sample_plot(),
            "blur_performance",
        ))
        .unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>blur_performance</title>"));
        assert!(html.contains("plotly") || html.contains("Plotly"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_write_html_figure() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FigureSettings {
            formats: vec![FigureFormat::Html],
            scale: 1.0,
        };
        let written =
            write_figure(&sample_plot(), dir.path(), "speedup_summary", (800, 600), &settings)
                .unwrap();
        assert_eq!(written, vec![dir.path().join("speedup_summary.html")]);
        let html = std::fs::read_to_string(&written[0]).unwrap();
        assert!(html.contains("<title>speedup_summary</title>"));
    }

    #[test]
    fn test_no_formats_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FigureSettings {
            formats: vec![],
            scale: 1.0,
        };
        let written = write_figure(&sample_plot(), dir.path(), "x", (800, 600), &settings).unwrap();
        assert!(written.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(not(feature = "static-export"))]
    #[test]
    fn test_static_formats_fall_back_to_html() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FigureSettings {
            formats: vec![FigureFormat::Png, FigureFormat::Pdf],
            scale: 3.0,
        };
        let written =
            write_figure(&sample_plot(), dir.path(), "blur_performance", (1200, 800), &settings)
                .unwrap();
        assert_eq!(written, vec![dir.path().join("blur_performance.html")]);
        assert!(!dir.path().join("blur_performance.png").exists());
    }

    #[cfg(not(feature = "static-export"))]
    #[test]
    fn test_fallback_not_duplicated_when_html_requested() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FigureSettings {
            formats: vec![FigureFormat::Svg, FigureFormat::Html],
            scale: 1.0,
        };
        let written = write_figure(&sample_plot(), dir.path(), "x", (800, 600), &settings).unwrap();
        assert_eq!(written, vec![dir.path().join("x.html")]);
    }
}
