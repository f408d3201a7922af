use anyhow::{bail, Result};
use colored::Colorize;
use quadsearch_core::{canonical_form, is_indexable, skolemize};

use crate::nquads;

/// Print the document id for one N-Quads statement
pub async fn execute(statement: String, canonical: bool) -> Result<()> {
    let Some(quad) = nquads::parse_line(&statement)? else {
        bail!("No statement given");
    };

    println!("{}", skolemize(&quad));

    if canonical {
        println!("{} {}", "Canonical:".cyan().bold(), canonical_form(&quad));
    }
    if !is_indexable(&quad) {
        eprintln!(
            "{} object is not a string literal, this quad is never indexed",
            "Note:".yellow().bold()
        );
    }

    Ok(())
}
