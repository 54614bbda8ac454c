/*
 * tokens.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lists the placeholder vocabulary, for template authors.

use anyhow::{Context, Result};
use quotation_template::Token;

pub fn execute(json: bool) -> Result<()> {
    println!("{}", listing(json)?);
    Ok(())
}

fn listing(json: bool) -> Result<String> {
    if json {
        let entries: Vec<serde_json::Value> = Token::ALL
            .iter()
            .map(|token| {
                serde_json::json!({
                    "token": format!("{{{{{}}}}}", token.name()),
                    "description": token.description(),
                })
            })
            .collect();
        return serde_json::to_string_pretty(&entries).context("Failed to serialize tokens");
    }

    let width = Token::ALL
        .iter()
        .map(|token| token.name().len() + 4)
        .max()
        .unwrap_or(0);
    let lines: Vec<String> = Token::ALL
        .iter()
        .map(|token| {
            let placeholder = format!("{{{{{}}}}}", token.name());
            format!("{placeholder:<width$}  {}", token.description())
        })
        .collect();
    Ok(lines.join("\n"))
}
