use crate::common::*;

use crate::errors::report_error::*;
use crate::model::{
    configs::chart_config::*,
    report::{bar_chart_spec::*, report_definition::*},
};
use crate::traits::service_traits::chart_service::*;
use crate::utils_modules::io_utils::*;

use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, ChartBuilder, Color, DrawingArea, DrawingBackend, FontTransform, Histogram,
    IntoDrawingArea, IntoFont, IntoSegmentedCoord, RGBColor, SVGBackend, SegmentValue,
    ShapeStyle, WHITE,
};

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

#[derive(Debug, Clone, new)]
pub struct ChartServiceImpl {
    chart_config: ChartConfig,
}

#[doc = "Inserts thousands separators; fractional values keep two decimals"]
fn format_axis_number(value: f64) -> String {
    let rounded: f64 = value.round();
    let (int_part, frac) = if (value - rounded).abs() < 1e-9 {
        (rounded.abs() as u64, String::new())
    } else {
        let s: String = format!("{:.2}", value.abs());
        let (i, f) = s.split_once('.').unwrap_or((s.as_str(), "00"));
        (i.parse::<u64>().unwrap_or(0), format!(".{}", f))
    };

    let digits: String = int_part.to_string();
    let mut result: String = String::new();
    let mut count: i32 = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }

    let sign: &str = if value < 0.0 && (int_part > 0 || !frac.is_empty()) {
        "-"
    } else {
        ""
    };

    format!("{}{}{}", sign, result.chars().rev().collect::<String>(), frac)
}

#[doc = "Height reserved under the plot for rotated category labels plus the axis title"]
fn x_label_area_size(labels: &[String], font_size: f64, height: u32) -> u32 {
    let longest: usize = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let needed: u32 = (longest as f64 * font_size * 0.6) as u32 + 50;
    needed.min(height / 2)
}

fn draw_bar_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &BarChartSpec,
    x_tick_font_size: f64,
    x_area: u32,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let labels: &[String] = spec.labels();
    let (y_min, y_max) = spec.y_range();

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title(), ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(x_area)
        .y_label_area_size(90)
        .build_cartesian_2d((0..labels.len()).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_label())
        .y_desc(spec.y_label())
        .x_labels(labels.len())
        .y_labels(10)
        .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
        .x_label_style(
            ("sans-serif", x_tick_font_size)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .axis_desc_style(("sans-serif", 18))
        .x_label_formatter(&|x: &SegmentValue<usize>| match x {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .y_label_formatter(&|y: &f64| format_axis_number(*y))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BAR_COLOR.filled())
            .margin(4)
            .data(spec.values().iter().enumerate().map(|(i, v)| (i, *v))),
    )?;

    root.present()?;
    Ok(())
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    async fn render_bar_chart(
        &self,
        def: &ReportDefinition,
        spec: &BarChartSpec,
        output_path: &Path,
    ) -> Result<(), ReportError> {
        if spec.labels().is_empty() || spec.labels().len() != spec.values().len() {
            return Err(ReportError::render(
                def.id(),
                format!(
                    "[ChartServiceImpl->render_bar_chart] labels and values must be non-empty and of equal length: {} vs {}",
                    spec.labels().len(),
                    spec.values().len()
                ),
            ));
        }

        ensure_parent_dir(output_path)
            .await
            .map_err(|e| ReportError::render(def.id(), format!("{:#}", e)))?;

        let output_path_buf: PathBuf = output_path.to_path_buf();
        let spec: BarChartSpec = spec.clone();
        let size: (u32, u32) = (*self.chart_config.width(), *self.chart_config.height());
        let font_size: f64 = f64::from(*self.chart_config.x_tick_font_size());
        let x_area: u32 = x_label_area_size(spec.labels(), font_size, size.1);
        let is_svg: bool = output_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        let handle: tokio::task::JoinHandle<Result<(), anyhow::Error>> =
            tokio::task::spawn_blocking(move || {
                if is_svg {
                    let root = SVGBackend::new(&output_path_buf, size).into_drawing_area();
                    draw_bar_chart(&root, &spec, font_size, x_area)
                } else {
                    let root = BitMapBackend::new(&output_path_buf, size).into_drawing_area();
                    draw_bar_chart(&root, &spec, font_size, x_area)
                }
            });

        let drawing_result: Result<(), anyhow::Error> = handle.await.map_err(|e| {
            ReportError::render(
                def.id(),
                format!(
                    "[ChartServiceImpl->render_bar_chart] blocking task join failed (panic/cancelled): {}",
                    e
                ),
            )
        })?;

        drawing_result.map_err(|e| {
            ReportError::render(
                def.id(),
                format!(
                    "[ChartServiceImpl->render_bar_chart] drawing/present failed: {:#}",
                    e
                ),
            )
        })?;

        info!("Bar chart generated successfully: {:?}", output_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_axis_numbers_with_separators() {
        assert_eq!(format_axis_number(0.0), "0");
        assert_eq!(format_axis_number(999.0), "999");
        assert_eq!(format_axis_number(1234567.0), "1,234,567");
        assert_eq!(format_axis_number(-2500.0), "-2,500");
        assert_eq!(format_axis_number(1234.5), "1,234.50");
    }

    #[test]
    fn label_area_grows_with_longest_label_but_is_capped() {
        let short: Vec<String> = vec!["2023-01".to_string()];
        let long: Vec<String> = vec!["x".repeat(200)];
        assert!(x_label_area_size(&short, 12.0, 700) < x_label_area_size(&long, 12.0, 700));
        assert_eq!(x_label_area_size(&long, 12.0, 700), 350);
    }

    #[tokio::test]
    async fn mismatched_spec_is_rejected_before_drawing() {
        let service: ChartServiceImpl = ChartServiceImpl::new(ChartConfig::default());
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("empty.png");
        let empty: BarChartSpec = BarChartSpec::from_parts(&USERS_BY_MONTH, vec![], vec![]);

        let err: ReportError = service
            .render_bar_chart(&USERS_BY_MONTH, &empty, &path)
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Render { .. }));
        assert!(!path.exists());
    }

    fn two_month_spec() -> BarChartSpec {
        BarChartSpec::from_parts(
            &USERS_BY_MONTH,
            vec!["2023-01".to_string(), "2023-02".to_string()],
            vec![3.0, 5.0],
        )
    }

    #[tokio::test]
    async fn renders_png_by_default() {
        let service: ChartServiceImpl = ChartServiceImpl::new(ChartConfig::default());
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("nested").join("users.png");

        service
            .render_bar_chart(&USERS_BY_MONTH, &two_month_spec(), &path)
            .await
            .unwrap();

        let bytes: Vec<u8> = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn svg_extension_selects_svg_with_title_and_labels() {
        let service: ChartServiceImpl = ChartServiceImpl::new(ChartConfig::default());
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("users.svg");

        service
            .render_bar_chart(&USERS_BY_MONTH, &two_month_spec(), &path)
            .await
            .unwrap();

        let svg: String = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Users by Month"));
        assert!(svg.contains("2023-01"));
        assert!(svg.contains("2023-02"));
        assert!(svg.contains("YearMonth"));
        assert!(svg.contains("NewUsers"));
    }
}
