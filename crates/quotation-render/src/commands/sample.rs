/*
 * sample.rs
 * Copyright (c) 2025 Posit, PBC
 */

use anyhow::{Context, Result};
use quotation_template::Template;

/// Print the starter template, ready to be edited and fed back to `render`.
pub fn execute() -> Result<()> {
    let json =
        serde_json::to_string_pretty(&Template::sample()).context("Failed to serialize template")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_round_trips() {
        let json = serde_json::to_string(&Template::sample()).unwrap();
        assert_eq!(Template::from_json(&json).unwrap(), Template::sample());
    }
}
