// canvas-kit/src/sources/fs.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A source that loads typefaces from a directory or directories on disk.
//!
//! This source uses the WalkDir abstraction from the `walkdir` crate to locate fonts. Each file
//! is read once to index its faces; typefaces keep only the path and reload glyph data on demand.

use log::{debug, warn};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::error::SelectionError;
use crate::family::Family;
use crate::source::Source;
use crate::sources::mem::MemSource;
use crate::typeface::Typeface;

/// The environment variable that replaces the platform font directories.
///
/// It holds a list of directories in the platform's `PATH` syntax.
pub const FONT_DIRS_ENV: &str = "CANVAS_KIT_FONT_DIRS";

/// A source that loads typefaces from a directory or directories on disk.
#[derive(Debug)]
pub struct FsSource {
    mem_source: MemSource,
}

impl FsSource {
    /// Indexes the typefaces found in the configured font directories: those named by
    /// `CANVAS_KIT_FONT_DIRS` if it is set, the platform defaults otherwise.
    ///
    /// Every font file is opened and parsed, so this can be slow on systems with many fonts.
    pub fn new() -> FsSource {
        FsSource::in_paths(font_directories())
    }

    /// Indexes all typefaces found under `path`.
    pub fn in_path<P>(path: P) -> FsSource
    where
        P: AsRef<Path>,
    {
        FsSource::in_paths(Some(path.as_ref().to_owned()))
    }

    /// Indexes all typefaces found under each of `paths`.
    pub fn in_paths<I>(paths: I) -> FsSource
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut typefaces = vec![];
        for path in paths {
            typefaces.extend(discover_typefaces(&path));
        }
        debug!("indexed {} typefaces from disk", typefaces.len());
        FsSource {
            mem_source: MemSource::from_typefaces(typefaces),
        }
    }

    /// Returns all typefaces found on disk.
    pub fn all_typefaces(&self) -> Result<Vec<Arc<Typeface>>, SelectionError> {
        self.mem_source.all_typefaces()
    }

    /// Returns the names of all families found on disk.
    pub fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        self.mem_source.all_families()
    }

    /// Looks up a family by name.
    pub fn select_family_by_name(&self, family_name: &str) -> Result<Family, SelectionError> {
        self.mem_source.select_family_by_name(family_name)
    }
}

impl Default for FsSource {
    fn default() -> FsSource {
        FsSource::new()
    }
}

impl Source for FsSource {
    #[inline]
    fn all_typefaces(&self) -> Result<Vec<Arc<Typeface>>, SelectionError> {
        self.all_typefaces()
    }

    #[inline]
    fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        self.all_families()
    }

    #[inline]
    fn select_family_by_name(&self, family_name: &str) -> Result<Family, SelectionError> {
        self.select_family_by_name(family_name)
    }
}

fn discover_typefaces(path: &Path) -> Vec<Arc<Typeface>> {
    let mut typefaces = vec![];
    for directory_entry in WalkDir::new(path).follow_links(true).into_iter() {
        let directory_entry = match directory_entry {
            Ok(directory_entry) => directory_entry,
            Err(_) => continue,
        };
        if !directory_entry.file_type().is_file() || !has_font_extension(directory_entry.path()) {
            continue;
        }
        let path = directory_entry.path();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!("could not read {}: {}", path.display(), error);
                continue;
            }
        };
        let face_count = match Typeface::count_faces(&bytes) {
            Some(face_count) => face_count,
            None => continue,
        };
        for font_index in 0..face_count {
            match Typeface::from_file_bytes(path, &bytes, font_index) {
                Ok(typeface) => typefaces.push(typeface),
                Err(error) => {
                    warn!("skipping face {} of {}: {}", font_index, path.display(), error)
                }
            }
        }
    }
    typefaces
}

fn has_font_extension(path: &Path) -> bool {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some(extension) => match &*extension.to_ascii_lowercase() {
            "ttf" | "otf" | "ttc" | "otc" => true,
            _ => false,
        },
        None => false,
    }
}

/// The directories the default source scans.
pub fn font_directories() -> Vec<PathBuf> {
    match env::var_os(FONT_DIRS_ENV) {
        Some(paths) => env::split_paths(&paths).collect(),
        None => default_font_directories(),
    }
}

#[cfg(target_os = "android")]
fn default_font_directories() -> Vec<PathBuf> {
    vec![PathBuf::from("/system/fonts")]
}

#[cfg(target_family = "windows")]
fn default_font_directories() -> Vec<PathBuf> {
    let mut directories = vec![];
    if let Some(windows) = env::var_os("WINDIR") {
        directories.push(PathBuf::from(windows).join("Fonts"));
    }
    if let Some(path) = dirs_next::data_local_dir() {
        directories.push(path.join("Microsoft").join("Windows").join("Fonts"));
    }
    directories
}

#[cfg(target_os = "macos")]
fn default_font_directories() -> Vec<PathBuf> {
    let mut directories = vec![
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/Network/Library/Fonts"),
    ];
    if let Some(mut path) = dirs_next::home_dir() {
        path.push("Library");
        path.push("Fonts");
        directories.push(path);
    }
    directories
}

#[cfg(not(any(target_os = "android", target_family = "windows", target_os = "macos")))]
fn default_font_directories() -> Vec<PathBuf> {
    let mut directories = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
    ];
    if let Some(path) = dirs_next::home_dir() {
        directories.push(path.join(".fonts"));
    }
    if let Some(mut path) = dirs_next::data_dir() {
        path.push("fonts");
        directories.push(path);
    }
    directories
}
