use anyhow::Result;
use cluemetrics_core::WordExactState;
use serde_json::json;

/// Print a metric result either as a single human readable line or as JSON.
pub(crate) fn print_result(name: &str, state: &WordExactState, as_json: bool) -> Result<()> {
    let value = state.ratio()?;
    if as_json {
        let output = json!({
            "metric": name,
            "value": value,
            "correct": state.correct(),
            "total": state.total(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{}: {:.4} ({}/{})",
            name,
            value,
            state.correct(),
            state.total()
        );
    }
    Ok(())
}
