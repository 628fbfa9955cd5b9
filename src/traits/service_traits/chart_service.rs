use crate::common::*;

use crate::errors::report_error::*;
use crate::model::report::{bar_chart_spec::*, report_definition::*};

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Draw a bar chart and save it as an image file
        # Arguments
        * `def` - Report the chart belongs to (for error context)
        * `spec` - Title, axis labels and bars in plotting order
        * `output_path` - Where the image is written; `.svg` selects SVG, anything else PNG
    "]
    async fn render_bar_chart(
        &self,
        def: &ReportDefinition,
        spec: &BarChartSpec,
        output_path: &Path,
    ) -> Result<(), ReportError>;
}
