use crate::common::*;

use crate::dto::result_table::*;
use crate::errors::report_error::*;
use crate::model::report::report_definition::*;

#[doc = "Everything the renderer needs to draw one bar chart, bars in plotting order"]
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct BarChartSpec {
    title: String,
    x_label: String,
    y_label: String,
    labels: Vec<String>,
    values: Vec<f64>,
}

impl BarChartSpec {
    #[doc = r#"
        Builds the chart from an already sorted result table.

        1. Every designated column (sort, x, y) must be present
        2. The table must hold at least one row
        3. y cells must be numeric; a null y is drawn as a zero-height bar

        Any violation is a render error, raised before anything is drawn.
    "#]
    pub fn from_table(def: &ReportDefinition, table: &ResultTable) -> Result<Self, ReportError> {
        let report: &str = def.id();

        for column in def.required_columns() {
            table.require_column(report, column)?;
        }

        if table.is_empty() {
            return Err(ReportError::render(
                report,
                format!("`{}` returned no rows, nothing to plot", def.query()),
            ));
        }

        let x_idx: usize = table.require_column(report, def.x_column())?;
        let y_idx: usize = table.require_column(report, def.y_column())?;

        let labels: Vec<String> = table
            .column_values(x_idx)
            .map(|cell| cell.to_string())
            .collect();

        let mut values: Vec<f64> = Vec::with_capacity(table.len());

        for (row_no, cell) in table.column_values(y_idx).enumerate() {
            let value: f64 = match cell {
                CellValue::Null => {
                    warn!(
                        "[BarChartSpec->from_table] {} row {} has a null {}; plotting 0",
                        report,
                        row_no,
                        def.y_column()
                    );
                    0.0
                }
                other => other.as_f64().ok_or_else(|| {
                    ReportError::render(
                        report,
                        format!(
                            "column '{}' row {} is not numeric: {:?}",
                            def.y_column(),
                            row_no,
                            other
                        ),
                    )
                })?,
            };
            values.push(value);
        }

        Ok(BarChartSpec {
            title: def.title().to_string(),
            x_label: def.x_label().to_string(),
            y_label: def.y_label().to_string(),
            labels,
            values,
        })
    }

    #[cfg(test)]
    pub fn from_parts(def: &ReportDefinition, labels: Vec<String>, values: Vec<f64>) -> Self {
        BarChartSpec {
            title: def.title().to_string(),
            x_label: def.x_label().to_string(),
            y_label: def.y_label().to_string(),
            labels,
            values,
        }
    }

    #[doc = "Y-axis range: always includes zero, padded by 10% of the span"]
    pub fn y_range(&self) -> (f64, f64) {
        let min_val: f64 = self.values.iter().copied().fold(0.0, f64::min);
        let max_val: f64 = self.values.iter().copied().fold(0.0, f64::max);

        let padding: f64 = ((max_val - min_val) * 0.1).max(1.0);

        let y_min: f64 = if min_val < 0.0 { min_val - padding } else { 0.0 };
        (y_min, max_val + padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> ResultTable {
        ResultTable::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn builds_bars_in_table_order() {
        let t: ResultTable = table(
            &["YearMonth", "NewUsers"],
            vec![
                vec!["2023-01".into(), CellValue::Int(3)],
                vec!["2023-02".into(), CellValue::Int(5)],
            ],
        );

        let spec: BarChartSpec = BarChartSpec::from_table(&USERS_BY_MONTH, &t).unwrap();

        assert_eq!(spec.title(), "Users by Month");
        assert_eq!(spec.x_label(), "YearMonth");
        assert_eq!(spec.y_label(), "NewUsers");
        assert_eq!(spec.labels(), &vec!["2023-01".to_string(), "2023-02".to_string()]);
        assert_eq!(spec.values(), &vec![3.0, 5.0]);
    }

    #[test]
    fn empty_table_is_render_error() {
        let t: ResultTable = table(&["YearMonth", "Transactions"], vec![]);
        let err: ReportError = BarChartSpec::from_table(&TRANSACTIONS_BY_MONTH, &t).unwrap_err();
        assert!(matches!(err, ReportError::Render { .. }));
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn missing_plot_column_is_render_error() {
        let t: ResultTable = table(
            &["category", "Transactions"],
            vec![vec!["Books".into(), CellValue::Int(4)]],
        );
        let err: ReportError =
            BarChartSpec::from_table(&TRANSACTIONS_BY_PRODUCT, &t).unwrap_err();
        assert!(err.to_string().contains("maincategory"));
    }

    #[test]
    fn text_value_is_render_error_and_null_is_zero() {
        let bad: ResultTable = table(
            &["YearMonth", "NewUsers"],
            vec![vec!["2023-01".into(), "many".into()]],
        );
        assert!(BarChartSpec::from_table(&USERS_BY_MONTH, &bad).is_err());

        let with_null: ResultTable = table(
            &["YearMonth", "NewUsers"],
            vec![vec!["2023-01".into(), CellValue::Null]],
        );
        let spec: BarChartSpec = BarChartSpec::from_table(&USERS_BY_MONTH, &with_null).unwrap();
        assert_eq!(spec.values(), &vec![0.0]);
    }

    #[test]
    fn y_range_starts_at_zero_with_headroom() {
        let t: ResultTable = table(
            &["YearMonth", "NewUsers"],
            vec![
                vec!["2023-01".into(), CellValue::Int(40)],
                vec!["2023-02".into(), CellValue::Int(100)],
            ],
        );
        let spec: BarChartSpec = BarChartSpec::from_table(&USERS_BY_MONTH, &t).unwrap();
        assert_eq!(spec.y_range(), (0.0, 110.0));
    }
}
