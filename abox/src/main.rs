use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

use abox::applets::Streams;
use abox::config::Config;
use abox::{cli, logging};

fn main() {
    let config = Config::from_env();
    logging::init(&config);

    let argv: Vec<Vec<u8>> = std::env::args_os().map(OsString::into_vec).collect();
    let code = cli::run(&argv, &Streams::default());
    std::process::exit(code);
}
