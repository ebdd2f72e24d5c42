//! rdy - Readyroom command-line interface
//!
//! Thin binary entry point. All real work happens in [`readyroom::cli`].

fn main() {
    if let Err(err) = readyroom::cli::run() {
        readyroom::ui::output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
