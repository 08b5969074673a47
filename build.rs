// Stages the static site (page + wasm-pack output in static/pkg) into `dist/`.
use std::{fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    if let Err(err) = fs::create_dir_all(out_dir) {
        println!("cargo:warning=could not create dist/: {err}");
        return;
    }

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }
    let options = CopyOptions {
        overwrite: true,
        content_only: true,
        ..CopyOptions::new()
    };
    if let Err(err) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {err}");
    }
}
