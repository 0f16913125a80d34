use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=tessdata/");
    println!("cargo:rerun-if-changed=models/ocrs/");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    if manifest_dir.join("tessdata").exists() {
        println!("cargo:warning=Found tessdata directory for bundling");
    } else {
        println!("cargo:warning=No tessdata directory found. Tesseract will use system data.");
    }

    if !manifest_dir.join("models/ocrs").exists() {
        println!("cargo:warning=No models/ocrs directory found. The ocrs engine needs configured models.");
    }
}
