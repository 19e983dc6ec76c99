use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{harvest::Harvest, listing::JobListing, page::Page};

/// Where one run's results go.
#[derive(Debug, Clone)]
pub struct Sink {
    /// Pretty-printed JSON array of listings.
    pub output: PathBuf,
    /// Full page markup, written only when no tiles were found.
    pub dump: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Saved {
    Listings { count: usize, path: PathBuf },
    NoContainers { output: PathBuf, dump: PathBuf },
}

impl Sink {
    pub fn new(output: impl Into<PathBuf>, dump: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            dump: dump.into(),
        }
    }

    /// Writes the listings (an empty array included) and, when the cascade found
    /// nothing, the page markup for offline inspection.
    pub fn persist<P: Page>(&self, harvest: &Harvest, page: &P) -> anyhow::Result<Saved> {
        write_listings(&self.output, &harvest.listings)?;

        if harvest.no_containers() {
            let markup = page.markup()?;
            std::fs::write(&self.dump, markup)?;
            tracing::error!(target: "output", "\x1b[31mno job tiles found\x1b[0m, page saved to {}", self.dump.display());
            return Ok(Saved::NoContainers {
                output: self.output.clone(),
                dump: self.dump.clone(),
            });
        }

        tracing::info!(target: "output", "\x1b[36msaved {} listings\x1b[0m to {}", harvest.listings.len(), self.output.display());
        Ok(Saved::Listings {
            count: harvest.listings.len(),
            path: self.output.clone(),
        })
    }
}

pub fn write_listings(path: &Path, listings: &[JobListing]) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, listings)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
