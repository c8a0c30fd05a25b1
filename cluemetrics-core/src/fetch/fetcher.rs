use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Error, Result};

use super::{FetchConfig, HttpPageSource, PageSource};

/// Passed to the progress callback after each page is on disk.
#[derive(Debug)]
pub struct PageRecord<'a> {
    pub index: usize,
    pub offset: u64,
    pub path: &'a Path,
    pub bytes: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub pages: usize,
    pub bytes: u64,
    pub files: Vec<PathBuf>,
}

/// Sequentially pages through a dataset and writes each page to its own file.
///
/// The first non-200 response aborts the run with [`Error::Fetch`]. There is
/// no retry and no resume; pages written before the failure stay on disk.
pub struct Fetcher<S: PageSource> {
    config: FetchConfig,
    source: S,
}

impl Fetcher<HttpPageSource> {
    pub fn from_config(config: FetchConfig) -> Result<Fetcher<HttpPageSource>> {
        let source = HttpPageSource::new(Duration::from_secs(config.timeout_secs()))?;
        Fetcher::new(config, source)
    }
}

impl<S: PageSource> Fetcher<S> {
    pub fn new(config: FetchConfig, source: S) -> Result<Fetcher<S>> {
        config.validate()?;
        Ok(Fetcher { config, source })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn offsets(&self) -> impl Iterator<Item = u64> {
        self.config.offsets()
    }

    pub fn page_count(&self) -> u64 {
        self.config.page_count()
    }

    pub fn run<F>(&self, mut on_page: F) -> Result<FetchReport>
    where
        F: FnMut(&PageRecord),
    {
        std::fs::create_dir_all(self.config.output_dir())?;
        info!(
            pages = self.page_count(),
            output_dir = %self.config.output_dir().display(),
            "starting fetch"
        );

        let mut report = FetchReport::default();
        for (index, offset) in self.offsets().enumerate() {
            let url = self.config.url_for(offset);
            let page = self.source.get(offset, &url)?;
            if page.status != 200 {
                return Err(Error::Fetch {
                    offset,
                    status: page.status,
                });
            }

            let path = self.config.file_path(index);
            std::fs::write(&path, &page.body)?;
            debug!(index, offset, bytes = page.body.len(), path = %path.display(), "wrote page");

            on_page(&PageRecord {
                index,
                offset,
                path: &path,
                bytes: page.body.len(),
            });

            report.pages += 1;
            report.bytes += page.body.len() as u64;
            report.files.push(path);
        }

        info!(pages = report.pages, bytes = report.bytes, "fetch complete");
        Ok(report)
    }
}
