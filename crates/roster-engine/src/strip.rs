//! Page strip model: `previous | 1 … 4 5 6 … 12 | next`.

use std::fmt;

use serde::Serialize;

/// One element of a page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageLink {
    /// Link to the previous page.
    Previous {
        /// `false` on the first page.
        enabled: bool,
    },
    /// Link to a numbered page.
    Page {
        /// One-based page number.
        number: usize,
        /// `true` for the page being shown.
        current: bool,
    },
    /// A collapsed run of hidden pages.
    Gap,
    /// Link to the next page.
    Next {
        /// `false` on the last page.
        enabled: bool,
    },
}

/// The pagination controls under a listing.
///
/// The first and last pages are always present, as are the pages within
/// `window` of the current page. A hidden run of two or more pages collapses
/// into a single [`PageLink::Gap`]; a hidden run of exactly one page is shown
/// as that page instead, since a gap would take the same space.
///
/// ```
/// use roster_engine::PageStrip;
///
/// let strip = PageStrip::new(6, 12, 1);
/// assert_eq!(strip.to_string(), "‹ prev | 1 … 5 [6] 7 … 12 | next ›");
///
/// let short = PageStrip::new(1, 3, 1);
/// assert_eq!(short.to_string(), "‹ prev | [1] 2 3 | next ›");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStrip {
    links: Vec<PageLink>,
}

impl PageStrip {
    /// Builds the strip for `current` out of `total_pages`.
    ///
    /// A `current` beyond `total_pages` marks no page as current and leaves
    /// only the previous link enabled.
    pub fn new(current: usize, total_pages: usize, window: usize) -> Self {
        let mut links = Vec::new();
        links.push(PageLink::Previous {
            enabled: current > 1 && total_pages > 0,
        });

        if total_pages > 0 {
            let anchor = current.clamp(1, total_pages);
            let low = anchor.saturating_sub(window).max(1);
            let high = anchor.saturating_add(window).min(total_pages);

            let mut shown: Vec<usize> = Vec::new();
            shown.push(1);
            shown.extend(low..=high);
            shown.push(total_pages);
            shown.sort_unstable();
            shown.dedup();

            let mut previous: Option<usize> = None;
            for number in shown {
                if let Some(prev) = previous {
                    match number - prev {
                        1 => {}
                        2 => links.push(page(prev + 1, current)),
                        _ => links.push(PageLink::Gap),
                    }
                }
                links.push(page(number, current));
                previous = Some(number);
            }
        }

        links.push(PageLink::Next {
            enabled: current < total_pages,
        });
        PageStrip { links }
    }

    /// The links, from previous to next.
    pub fn links(&self) -> &[PageLink] {
        &self.links
    }

    /// Page numbers present in the strip.
    pub fn pages(&self) -> Vec<usize> {
        self.links
            .iter()
            .filter_map(|link| match link {
                PageLink::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }
}

fn page(number: usize, current: usize) -> PageLink {
    PageLink::Page {
        number,
        current: number == current,
    }
}

impl fmt::Display for PageStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for link in &self.links {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match link {
                PageLink::Previous { .. } => f.write_str("‹ prev |")?,
                PageLink::Next { .. } => f.write_str("| next ›")?,
                PageLink::Gap => f.write_str("…")?,
                PageLink::Page { number, current: true } => write!(f, "[{}]", number)?,
                PageLink::Page { number, .. } => write!(f, "{}", number)?,
            }
        }
        Ok(())
    }
}
