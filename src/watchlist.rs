use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::models::WatchItem;
use crate::utils::error::{AppError, Result};

pub const WATCHLIST_TEMPLATE: &str = "\
# Product Watchlist
# Add product URLs (one per line)
# Lines starting with # are comments

# Example URLs (replace with real products):
# https://www.target.com/p/pokemon-tcg-prismatic-evolutions-elite-trainer-box/-/A-12345678
# https://www.bestbuy.com/site/pokemon-tcg-prismatic-evolutions-booster-bundle/6789012.p
# https://www.pokemoncenter.com/product/290-12345/pokemon-tcg-prismatic-evolutions-booster-box

# Add your product URLs below:
";

/// Watched items in file order, plus what is needed to notice the file changing.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    path: Option<PathBuf>,
    items: Vec<WatchItem>,
    modified: Option<SystemTime>,
}

impl Watchlist {
    /// A fixed list with no backing file. `refresh` never changes it.
    pub fn from_items(items: Vec<WatchItem>) -> Self {
        Self {
            path: None,
            items,
            modified: None,
        }
    }

    pub fn items(&self) -> &[WatchItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Re-read the backing file if its modification time moved. Returns whether items were reloaded.
    pub fn refresh(&mut self) -> Result<bool> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };

        let modified = match std::fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(modified) => Some(modified),
            // A watchlist deleted mid-run keeps the items already loaded.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        if modified == self.modified {
            return Ok(false);
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            // Removed between the metadata check and the read.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(watchlist_error(&path, e)),
        };

        let items = parse_watchlist(&contents);
        if items.is_empty() && !self.items.is_empty() {
            // Likely caught mid-write; `modified` stays put so the next refresh reads it again.
            tracing::warn!(
                "{} now lists no products; keeping the {} already loaded",
                path.display(),
                self.items.len()
            );
            return Ok(false);
        }

        self.items = items;
        self.modified = modified;
        Ok(true)
    }
}

/// Load the watchlist at `path`. A missing file is replaced by a commented template and yields
/// an empty list.
pub fn load_watchlist(path: &Path) -> Result<Watchlist> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Watchlist {
            path: Some(path.to_path_buf()),
            items: parse_watchlist(&contents),
            modified: std::fs::metadata(path).and_then(|meta| meta.modified()).ok(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("{} not found. Creating template...", path.display());
            std::fs::write(path, WATCHLIST_TEMPLATE).map_err(|e| watchlist_error(path, e))?;
            println!("✅ Created {} - add your product URLs and run again!", path.display());

            Ok(Watchlist {
                path: Some(path.to_path_buf()),
                items: Vec::new(),
                modified: std::fs::metadata(path).and_then(|meta| meta.modified()).ok(),
            })
        }
        Err(e) => Err(watchlist_error(path, e)),
    }
}

/// One URL per line; blank lines and `#` comments are skipped. Duplicates keep their first position.
pub fn parse_watchlist(contents: &str) -> Vec<WatchItem> {
    let mut items: Vec<WatchItem> = Vec::new();

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if items.iter().any(|item| item.id() == line) {
            tracing::debug!("Skipping duplicate watchlist entry: {}", line);
            continue;
        }
        items.push(WatchItem::new(line));
    }

    items
}

fn watchlist_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::Watchlist {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
