use crate::common::*;

use crate::errors::report_error::*;
use crate::model::report::report_definition::*;
use crate::traits::service_traits::display_service::*;

#[doc = r#"
    Shows rendered charts in an external viewer.

    When `show` is off the chart only lives on disk and `show()` returns at once.
    Otherwise the viewer command (configured, or the platform default) is run with
    the chart path appended, and the call blocks until that process exits.
    Launchers such as `xdg-open` exit as soon as they hand the file off, so a
    viewer that stays in the foreground (e.g. `feh`) is needed to keep the run open.
"#]
#[derive(Debug, Clone, new)]
pub struct DisplayServiceImpl {
    viewer: Option<String>,
    show: bool,
}

#[cfg(target_os = "macos")]
fn platform_viewer() -> Vec<String> {
    vec!["open".to_string(), "-W".to_string()]
}

#[cfg(windows)]
fn platform_viewer() -> Vec<String> {
    ["cmd", "/C", "start", "", "/WAIT"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_viewer() -> Vec<String> {
    vec!["xdg-open".to_string()]
}

impl DisplayServiceImpl {
    fn viewer_command(&self) -> Vec<String> {
        match self.viewer.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(viewer) => viewer.split_whitespace().map(str::to_string).collect(),
            None => platform_viewer(),
        }
    }
}

#[async_trait]
impl DisplayService for DisplayServiceImpl {
    async fn show(&self, def: &ReportDefinition, chart_path: &Path) -> Result<(), ReportError> {
        if !self.show {
            info!("[{}] chart written to {:?}", def.id(), chart_path);
            return Ok(());
        }

        let display_err = |reason: String| ReportError::Display {
            report: def.id().to_string(),
            path: chart_path.to_path_buf(),
            reason,
        };

        let command: Vec<String> = self.viewer_command();
        let (program, args) = command
            .split_first()
            .ok_or_else(|| display_err("no viewer command".to_string()))?;

        info!(
            "[{}] opening {:?} with `{}`; waiting for the viewer command to exit",
            def.id(),
            chart_path,
            command.join(" ")
        );

        let status: std::process::ExitStatus = tokio::process::Command::new(program)
            .args(args)
            .arg(chart_path)
            .status()
            .await
            .map_err(|e| display_err(format!("cannot start viewer '{}': {}", program, e)))?;

        if !status.success() {
            return Err(display_err(format!(
                "viewer '{}' exited with {}",
                program, status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_only_mode_does_not_launch_anything() {
        let service: DisplayServiceImpl =
            DisplayServiceImpl::new(Some("definitely-not-a-viewer".to_string()), false);
        service
            .show(&USERS_BY_MONTH, Path::new("charts/users-by-month.png"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_viewer_is_display_error() {
        let service: DisplayServiceImpl =
            DisplayServiceImpl::new(Some("definitely-not-a-viewer-binary".to_string()), true);
        let err: ReportError = service
            .show(&USERS_BY_MONTH, Path::new("charts/users-by-month.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Display { .. }));
        assert_eq!(err.exit_code(), 6);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn waits_for_viewer_and_checks_status() {
        let ok: DisplayServiceImpl = DisplayServiceImpl::new(Some("true".to_string()), true);
        ok.show(&USERS_BY_MONTH, Path::new("a.png")).await.unwrap();

        let failing: DisplayServiceImpl = DisplayServiceImpl::new(Some("false".to_string()), true);
        assert!(failing.show(&USERS_BY_MONTH, Path::new("a.png")).await.is_err());
    }

    #[test]
    fn configured_viewer_splits_arguments() {
        let service: DisplayServiceImpl =
            DisplayServiceImpl::new(Some("feh --scale-down".to_string()), true);
        assert_eq!(service.viewer_command(), vec!["feh", "--scale-down"]);

        let blank: DisplayServiceImpl = DisplayServiceImpl::new(Some("  ".to_string()), true);
        assert_eq!(blank.viewer_command(), platform_viewer());
    }
}
