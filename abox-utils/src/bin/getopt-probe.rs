// Test runner: getopt-probe OPTSTRING PROG [ARG]...
//
// Parses [PROG, ARG...] against OPTSTRING and prints one line per call:
//   ret=<letter|?|:|-1> optarg=<value|-> optind=<n> optopt=<letter|->
// followed by the remaining operands.

use std::ffi::OsString;
use std::io::Write;
use std::os::unix::ffi::OsStringExt;

use abox_utils::Getopt;

fn show(b: &[u8]) -> String {
    String::from_utf8_lossy(b).into_owned()
}

fn main() {
    let argv: Vec<Vec<u8>> = std::env::args_os()
        .skip(1)
        .map(OsString::into_vec)
        .collect();
    if argv.len() < 2 {
        eprintln!("usage: getopt-probe OPTSTRING PROG [ARG]...");
        std::process::exit(2);
    }

    let spec = &argv[0];
    let args = &argv[1..];
    let mut g = Getopt::new(args, spec.as_slice());

    loop {
        let ret = g.parse_code();
        let shown = match ret {
            -1 => "-1".to_string(),
            c => (c as u8 as char).to_string(),
        };
        println!(
            "ret={} optarg={} optind={} optopt={}",
            shown,
            g.optarg().map(show).unwrap_or_else(|| "-".into()),
            g.optind(),
            g.optopt()
                .map(|c| (c as char).to_string())
                .unwrap_or_else(|| "-".into()),
        );
        if let Some(mut msg) = g.diagnostic_bytes(&args[0]) {
            msg.push(b'\n');
            // Best effort, like C getopt's own fprintf.
            let _ = std::io::stderr().write_all(&msg);
        }
        if ret == -1 {
            break;
        }
    }

    let operands: Vec<String> = g.operands().iter().map(|a| show(a)).collect();
    println!("operands: {}", operands.join(" "));
}
