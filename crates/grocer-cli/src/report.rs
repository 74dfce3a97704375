//! Plain-text rendering of store lists and circulars for stdout.

use std::fmt;

use grocer_core::{Circular, StoreSummary};

const RULE_WIDTH: usize = 40;
const LIST_RULE_WIDTH: usize = 60;

/// `--list-stores` output: header, one padded line per store, total.
pub struct StoreList<'a>(pub &'a [StoreSummary]);

impl fmt::Display for StoreList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available ShopRite Stores:")?;
        writeln!(f, "{}", "=".repeat(LIST_RULE_WIDTH))?;
        for store in self.0 {
            writeln!(
                f,
                "{:>4}  {} ({}, {})",
                store.store_id, store.store_name, store.city, store.state
            )?;
        }
        writeln!(f, "\nTotal: {} stores", self.0.len())
    }
}

/// Notice printed when a city search matched more than one store.
pub struct MultipleMatches<'a> {
    pub city: &'a str,
    pub matches: &'a [StoreSummary],
}

impl fmt::Display for MultipleMatches<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Multiple stores found matching \"{}\":", self.city)?;
        for store in self.matches {
            writeln!(f, "  - {} (ID: {})", store.store_name, store.store_id)?;
        }
        if let Some(first) = self.matches.first() {
            writeln!(f, "Using first match: {}", first.store_id)?;
        }
        Ok(())
    }
}

/// Store block, circular block (when metadata loaded), one line per page,
/// and the first page URL on the last line.
pub struct CircularReport<'a>(pub &'a Circular);

impl fmt::Display for CircularReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let circular = self.0;
        let store = &circular.store;

        writeln!(f, "ShopRite Weekly Circular Fetcher")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "\nStore: {}", store.store_name)?;
        writeln!(
            f,
            "Address: {}, {}, {} {}",
            store.address, store.city, store.state, store.zipcode
        )?;
        writeln!(f, "Phone: {}", store.phone)?;
        writeln!(f, "Store ID: {}", store.store_id)?;
        writeln!(f, "Catalogue ID: {}", store.catalogue_id)?;

        if let Some(meta) = &circular.metadata {
            writeln!(f, "\nCircular: {}", meta.title)?;
            writeln!(f, "Valid: {} to {}", meta.start_date, meta.end_date)?;
            writeln!(f, "Pages: {}", meta.page_count)?;
        }

        writeln!(f, "\n{rule}")?;
        writeln!(f, "Circular Pages:")?;
        writeln!(f, "{rule}")?;
        for page in &circular.pages {
            writeln!(f, "Page {}: {}", page.page_number, page.image_url)?;
        }

        if let Some(url) = circular.first_page_url() {
            writeln!(f, "\n{rule}")?;
            writeln!(f, "First page URL:")?;
            writeln!(f, "{url}")?;
        }
        Ok(())
    }
}
