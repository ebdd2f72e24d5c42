//! path command - Normalize a path expression

use anyhow::{Context as _, Result};

use crate::core::path::KeyPath;

/// Normalize a path expression and print its canonical form.
///
/// # Arguments
///
/// * `expr` - Raw path expression (dotted, bracketed, or mixed)
pub fn path(expr: &str) -> Result<()> {
    let path = KeyPath::parse(expr)
        .with_context(|| format!("invalid path expression '{}'", expr))?;
    println!("{}", path);
    Ok(())
}
