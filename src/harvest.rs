use crate::{assemble::Assembler, cascade, fields::CONTAINERS, listing::JobListing, page::Page};

/// Outcome of one extraction pass.
#[derive(Debug, Default)]
pub struct Harvest {
    /// Listings in page order.
    pub listings: Vec<JobListing>,
    /// Selector that located the tiles; `None` when no candidate matched.
    pub selector: Option<&'static str>,
    pub containers: usize,
    /// Tiles that could not be read at all.
    pub failed: usize,
}

impl Harvest {
    #[inline]
    pub const fn no_containers(&self) -> bool {
        self.selector.is_none()
    }

    /// Tiles found but left out, either untitled or unreadable.
    #[inline]
    pub const fn skipped(&self) -> usize {
        self.containers - self.listings.len()
    }
}

/// Runs the container cascade over `page` with the built-in candidates and assembles every tile.
pub fn harvest<P: Page>(page: &P, assembler: &Assembler) -> Harvest {
    harvest_with(page, CONTAINERS, assembler)
}

pub fn harvest_with<P: Page>(page: &P, candidates: &[&'static str], assembler: &Assembler) -> Harvest {
    let Some(resolved) = cascade::resolve(page, candidates) else {
        tracing::error!(target: "harvest", "\x1b[31mno job tiles matched any of {} selectors\x1b[0m", candidates.len());
        return Harvest::default();
    };

    let containers = resolved.containers.len();
    let mut listings = Vec::with_capacity(containers);
    let mut failed = 0;
    for (idx, node) in resolved.containers.iter().enumerate() {
        match assembler.assemble(node) {
            Ok(Some(listing)) => {
                tracing::debug!(target: "harvest", "[#{idx}] {}", listing.title);
                listings.push(listing);
            }
            Ok(None) => tracing::debug!(target: "harvest", "[#{idx}] no title, skipped"),
            Err(e) => {
                failed += 1;
                tracing::error!(target: "harvest", "[#{idx}] tile parse error: {e:?}");
            }
        }
    }

    tracing::info!(target: "harvest", "\x1b[36m{} of {containers} tiles extracted\x1b[0m", listings.len());

    Harvest {
        listings,
        selector: Some(resolved.selector),
        containers,
        failed,
    }
}
