// canvas-kit/demos/list-typefaces.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lists the typefaces a font manager knows about.
//!
//! With no arguments the default font manager is listed; pass directories to index those instead.

use canvas_kit::font::Font;
use canvas_kit::font_mgr::FontMgr;
use canvas_kit::sources::fs::FsSource;
use canvas_kit::text_blob::TextEncoding;
use clap::{App, Arg};
use pbr::ProgressBar;
use prettytable::{Attr, Cell, Row, Table};
use std::path::PathBuf;

static SAMPLE_TEXT: &str = "Sphinx of black quartz, judge my vow";

fn main() {
    let matches = App::new("list-typefaces")
        .about("Lists typefaces with their styles and sample text widths")
        .arg(
            Arg::with_name("DIR")
                .help("Directories to index instead of the default font directories")
                .multiple(true)
                .index(1),
        )
        .arg(
            Arg::with_name("size")
                .long("size")
                .short("s")
                .takes_value(true)
                .default_value("12")
                .help("Font size used to measure the sample text"),
        )
        .get_matches();

    let size: f32 = matches
        .value_of("size")
        .and_then(|size| size.parse().ok())
        .unwrap_or(Font::DEFAULT_SIZE);
    let font_mgr = match matches.values_of("DIR") {
        Some(directories) => FontMgr::from_source(Box::new(FsSource::in_paths(
            directories.map(PathBuf::from),
        ))),
        None => FontMgr::default_mgr(),
    };

    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("PostScript Name").with_style(Attr::Bold),
        Cell::new("Family").with_style(Attr::Bold),
        Cell::new("Slant").with_style(Attr::Bold),
        Cell::new("Weight").with_style(Attr::Bold),
        Cell::new("Width").with_style(Attr::Bold),
        Cell::new("Sample Width").with_style(Attr::Bold),
    ]));

    let typefaces = font_mgr.typefaces().unwrap_or_default();
    let mut progress_bar = ProgressBar::new(typefaces.len() as u64);
    progress_bar.message("Measuring typefaces… ");

    for typeface in typefaces {
        let style = typeface.style();
        let font = Font::new(Some(typeface.clone()), size);
        let width = font
            .measure_text(SAMPLE_TEXT.as_bytes(), TextEncoding::Utf8)
            .unwrap_or(0.0);
        table.add_row(Row::new(vec![
            Cell::new(typeface.postscript_name().unwrap_or("")),
            Cell::new(typeface.family_name()),
            Cell::new(&style.slant.to_string()),
            Cell::new(&style.weight.0.to_string()),
            Cell::new(&style.width.0.to_string()),
            Cell::new(&format!("{:.1}", width)),
        ]));
        progress_bar.inc();
    }

    progress_bar.finish_print("");
    table.printstd();
}
