use std::path::PathBuf;
use std::process::exit;

use rust_text_editor::{clear_screen, Config, Editor, Error};

fn run() -> Result<(), Error> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 1 {
        return Err(Error::TooManyArguments(args.len() + 1));
    }

    let config = Config::default();
    let mut editor = Editor::new(config)?;
    editor.run(args.into_iter().next().map(PathBuf::from))
}

fn main() {
    if let Err(err) = run() {
        // Leave the terminal on a clean slate rather than stale editor content before reporting
        // the error and exiting; best-effort, since the terminal itself may be the thing broken.
        let _ = clear_screen();
        eprintln!("{err}");
        exit(1);
    }
}
