//! Mock case loading and operation binding.

use crate::error::{Result, StepError};
use pagestub_core::config::parser;
use pagestub_core::types::mock::MockBody;
use pagestub_core::MockRegistry;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Load mock case bodies from every file matching `pattern`.
///
/// Each file is a JSON, JSONC or YAML map of case id to body. Files are read in path order,
/// so a case defined twice keeps the body from the last file. Returns the number of cases read.
///
/// # Errors
/// Returns error if:
/// - `pattern` is not a valid glob
/// - a matched file cannot be read or parsed
pub async fn load_mock_cases(registry: &MockRegistry, pattern: &str) -> Result<usize> {
    let paths = glob::glob(pattern)
        .map_err(|source| StepError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?
        .collect::<std::result::Result<Vec<PathBuf>, _>>()?;

    let mut loaded = 0;
    for path in paths {
        let cases: HashMap<String, MockBody> =
            parser::load_config(&path)
                .await
                .map_err(|source| StepError::MockLoad {
                    path: path.display().to_string(),
                    source,
                })?;
        debug!(path = %path.display(), cases = cases.len(), "read mock case file");
        loaded += cases.len();
        registry.add_cases(cases);
    }

    info!(pattern, loaded, "loaded mock cases");
    Ok(loaded)
}

/// Bind operations to mock cases from `operation=case` pairs separated by commas.
///
/// Returns the number of bindings written.
pub fn bind_mocks(registry: &MockRegistry, param: &str) -> Result<usize> {
    let bindings = param
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| -> Result<(String, String)> {
            let (operation, case_id) = segment
                .split_once('=')
                .map(|(op, case)| (op.trim(), case.trim()))
                .filter(|(op, case)| !op.is_empty() && !case.is_empty())
                .ok_or_else(|| {
                    StepError::invalid("mock binding", segment, "expected operation=case")
                })?;
            Ok((operation.to_string(), case_id.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let count = bindings.len();
    registry.bind_all(bindings);
    Ok(count)
}
