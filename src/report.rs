//! Console output for the `search` and `save` commands

use std::io::{self, Write};

use crate::error::Result;
use crate::notion::{CreatedPage, PageSummary};

/// Print search results, listing at most `limit` pages.
///
/// A failed search is reported on `err` and then shown as an empty result.
pub fn print_search<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    pages: Result<Vec<PageSummary>>,
    limit: usize,
) -> io::Result<()> {
    let pages = match pages {
        Ok(pages) => pages,
        Err(e) => {
            writeln!(err, "Error searching: {}", e)?;
            Vec::new()
        }
    };

    if pages.is_empty() {
        writeln!(
            out,
            "No accessible pages found. Please add the integration to a page."
        )?;
        return Ok(());
    }

    writeln!(out, "Found {} pages:", pages.len())?;
    for page in pages.iter().take(limit) {
        writeln!(out, "- [{}] (ID: {})", page.title, page.id)?;
    }
    Ok(())
}

/// Print the outcome of a page-create call. Returns whether the page exists.
pub fn print_created<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    created: Result<CreatedPage>,
) -> io::Result<bool> {
    match created {
        Ok(page) => {
            writeln!(out, "Success! Page created.")?;
            writeln!(out, "{}", page.url)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(err, "Error creating page: {}", e)?;
            Ok(false)
        }
    }
}
