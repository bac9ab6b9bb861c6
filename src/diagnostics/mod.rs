// Physical-layer metrics from the platform Wi-Fi diagnostic tool

pub mod parse;

pub use parse::{parse_airport_info, parse_system_profiler};

use crate::command;
use crate::config::{DiagnosticChoice, ToolsConfig};
use crate::error::CollectorError;
use crate::models::PhysicalMetrics;
use std::future::Future;
use std::path::Path;
use tracing::instrument;

/// Which tool produces the raw text, and therefore which parser reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSource {
    /// `system_profiler SPAirPortDataType` (current macOS).
    SystemProfiler,
    /// Deprecated `airport -I` utility.
    Airport,
}

impl DiagnosticSource {
    /// Resolve the configured choice. `Auto` prefers system_profiler, falls back to the
    /// airport utility when only that one is installed.
    pub fn detect(choice: DiagnosticChoice, system_profiler: &Path, airport: &Path) -> Self {
        match choice {
            DiagnosticChoice::SystemProfiler => DiagnosticSource::SystemProfiler,
            DiagnosticChoice::Airport => DiagnosticSource::Airport,
            DiagnosticChoice::Auto => {
                if !system_profiler.exists() && airport.exists() {
                    DiagnosticSource::Airport
                } else {
                    DiagnosticSource::SystemProfiler
                }
            }
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            DiagnosticSource::SystemProfiler => vec!["SPAirPortDataType".into()],
            DiagnosticSource::Airport => vec!["-I".into()],
        }
    }

    pub fn parse(&self, text: &str) -> PhysicalMetrics {
        match self {
            DiagnosticSource::SystemProfiler => parse_system_profiler(text),
            DiagnosticSource::Airport => parse_airport_info(text),
        }
    }
}

/// Collaborator that returns the diagnostic tool's raw output.
pub trait DiagnosticTool {
    fn source(&self) -> DiagnosticSource;

    /// Raw text on success; `CollectorError::Command` when the tool is missing or exits non-zero.
    fn query_physical_layer(&self) -> impl Future<Output = Result<String, CollectorError>>;
}

/// Runs the selected macOS tool as a child process.
pub struct MacDiagnostics {
    source: DiagnosticSource,
    program: String,
}

impl MacDiagnostics {
    pub fn new(source: DiagnosticSource, program: impl Into<String>) -> Self {
        Self {
            source,
            program: program.into(),
        }
    }

    pub fn from_config(tools: &ToolsConfig) -> Self {
        let source = DiagnosticSource::detect(
            tools.diagnostic,
            Path::new(&tools.system_profiler),
            Path::new(&tools.airport),
        );
        let program = match source {
            DiagnosticSource::SystemProfiler => tools.system_profiler.clone(),
            DiagnosticSource::Airport => tools.airport.clone(),
        };
        Self::new(source, program)
    }
}

impl DiagnosticTool for MacDiagnostics {
    fn source(&self) -> DiagnosticSource {
        self.source
    }

    async fn query_physical_layer(&self) -> Result<String, CollectorError> {
        let out = command::run(&self.program, &self.source.args())
            .await
            .map_err(|e| CollectorError::Command {
                program: self.program.clone(),
                detail: e.to_string(),
            })?;
        if !out.success() {
            return Err(CollectorError::Command {
                program: self.program.clone(),
                detail: out.failure_detail(),
            });
        }
        Ok(out.stdout)
    }
}

/// Query the tool and parse its output. Only invocation failures are errors.
#[instrument(skip_all, fields(operation = "get_physical_metrics", source = ?tool.source()))]
pub async fn get_physical_metrics<D: DiagnosticTool>(
    tool: &D,
) -> Result<PhysicalMetrics, CollectorError> {
    let text = tool.query_physical_layer().await?;
    let metrics = tool.source().parse(&text);
    if metrics.rssi.is_none() {
        tracing::debug!("signal/noise line not found in diagnostic output");
    }
    Ok(metrics)
}
