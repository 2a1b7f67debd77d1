//! Font loading and caching.
//!
//! Fonts embedded via `typst-assets` cover the Latin document chrome. The
//! cache additionally scans the host's font directories so Hangul evidence
//! text (page titles, disclosure marks) renders when a CJK font is
//! installed; without one, those glyphs fall back to tofu rather than
//! failing the render.

use std::sync::OnceLock;

use typst::foundations::Bytes;
use typst::text::{Font, FontBook};

static FONT_CACHE: OnceLock<FontCache> = OnceLock::new();

/// The process-wide font cache, loaded on first use.
pub fn global_font_cache() -> &'static FontCache {
    FONT_CACHE.get_or_init(FontCache::new)
}

/// Fonts available to every compilation.
#[derive(Debug)]
pub struct FontCache {
    book: FontBook,
    fonts: Vec<Font>,
}

impl FontCache {
    pub fn new() -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        for data in typst_assets::fonts() {
            let buffer = Bytes::from_static(data);
            for font in Font::iter(buffer) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }

        for dir in system_font_dirs() {
            let path = std::path::Path::new(dir);
            if path.exists() {
                scan_font_dir(path, &mut book, &mut fonts);
            }
        }

        tracing::info!("font cache initialized with {} fonts", fonts.len());

        Self { book, fonts }
    }

    pub fn book(&self) -> &FontBook {
        &self.book
    }

    pub fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

fn system_font_dirs() -> &'static [&'static str] {
    &[
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/Library/Fonts",
        "/System/Library/Fonts",
        "C:\\Windows\\Fonts",
    ]
}

fn scan_font_dir(dir: &std::path::Path, book: &mut FontBook, fonts: &mut Vec<Font>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_font_dir(&path, book, fonts);
        } else if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc") {
                load_font_file(&path, book, fonts);
            }
        }
    }
}

fn load_font_file(path: &std::path::Path, book: &mut FontBook, fonts: &mut Vec<Font>) {
    let Ok(data) = std::fs::read(path) else {
        return;
    };

    let buffer = Bytes::from(data);
    for font in Font::iter(buffer) {
        book.push(font.info().clone());
        fonts.push(font);
    }
}
