//! Interactive prompts using dialoguer
//!
//! These stand in for the dashboard sidebar: multi-selects for categories and
//! labels, range inputs, and confirmations.

use std::collections::BTreeSet;

use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect};

use crate::pipeline::NumericRange;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Multi-select over `options`, pre-checking the values in `selected`.
///
/// Returns the chosen values in option order.
pub fn select_values(
    prompt: &str,
    options: &[String],
    selected: &BTreeSet<String>,
) -> Result<Vec<String>> {
    if options.is_empty() {
        return Ok(Vec::new());
    }

    let defaults: Vec<bool> = options.iter().map(|o| selected.contains(o)).collect();
    let chosen = MultiSelect::new()
        .with_prompt(prompt)
        .items(options)
        .defaults(&defaults)
        .max_length(15)
        .interact()?;

    Ok(chosen.into_iter().map(|i| options[i].clone()).collect())
}

/// Ask for an inclusive range, starting from `current` and bounded by `bounds`
pub fn input_range(prompt: &str, current: NumericRange, bounds: NumericRange) -> Result<NumericRange> {
    let low: f64 = Input::new()
        .with_prompt(format!("{} from ({:.0}-{:.0})", prompt, bounds.low, bounds.high))
        .default(current.low)
        .validate_with(|v: &f64| within(*v, bounds))
        .interact_text()?;

    let high: f64 = Input::new()
        .with_prompt(format!("{} to ({:.0}-{:.0})", prompt, bounds.low, bounds.high))
        .default(current.high)
        .validate_with(|v: &f64| within(*v, bounds))
        .interact_text()?;

    Ok(NumericRange::new(low, high))
}

fn within(value: f64, bounds: NumericRange) -> std::result::Result<(), String> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(format!(
            "value must be between {:.0} and {:.0}",
            bounds.low, bounds.high
        ))
    }
}
