// canvas-kit/c/build.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use cbindgen::{Builder, Language};
use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");

    let (crate_dir, out_dir) = match (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) {
        (Ok(crate_dir), Ok(out_dir)) => (crate_dir, PathBuf::from(out_dir)),
        _ => return,
    };

    let bindings = Builder::new()
        .with_crate(crate_dir)
        .with_language(Language::C)
        .with_include_guard("CANVAS_KIT_H")
        .with_sys_include("stdbool.h")
        .with_sys_include("stddef.h")
        .with_sys_include("stdint.h")
        .generate();
    match bindings {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("canvas_kit.h"));
        }
        Err(error) => println!("cargo:warning=could not generate canvas_kit.h: {}", error),
    }
}
