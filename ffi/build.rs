//! Generates `include/todo_codec.h` from the `extern "C"` surface.

use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR unavailable: {e}");
            return;
        }
    };
    let include_dir = crate_dir.join("include");
    if let Err(e) = std::fs::create_dir_all(&include_dir) {
        println!("cargo:warning=cannot create {}: {e}", include_dir.display());
        return;
    }

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("TODO_CODEC_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(include_dir.join("todo_codec.h"));
        }
        Err(e) => println!("cargo:warning=header not generated: {e}"),
    }
}
