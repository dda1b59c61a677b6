//! Lumen binary: open the viewer window with options from disk when a
//! preset path is given.

use lumen::options::Options;
use lumen::Viewer;

fn main() {
    env_logger::init();

    let mut builder = Viewer::builder();

    if let Some(path) = std::env::args().nth(1) {
        match Options::load(std::path::Path::new(&path)) {
            Ok(options) => builder = builder.with_options(options),
            Err(e) => {
                log::error!("failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = builder.build().run() {
        log::error!("viewer exited with error: {e}");
        std::process::exit(1);
    }
}
