//! Model command implementation.

use crate::display::load_estimator;
use anyhow::Result;
use std::path::Path;

/// Print the active estimate model as JSON.
pub(crate) fn show_model(model: Option<&Path>) -> Result<()> {
    let estimator = load_estimator(model)?;
    println!("{}", estimator.model().to_json_pretty()?);
    Ok(())
}
