use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use getopts::Options;
use tokio::time::Duration;

use crate::cache::DEFAULT_TTL;

const DEFAULT_URL: &str = "http://www.iksu.se/traning/traningsutbud/klattring/";
const DEFAULT_SELECTOR: &str = "#post-35";
const DEFAULT_OUTPUT: &str = "walls-closed.ics";
const DEFAULT_TIMEOUT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write the calendar to a file once.
    Write,
    /// Serve the calendar over HTTP.
    Serve,
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub address: SocketAddr,
    pub url: String,
    pub selector: String,
    pub output: PathBuf,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on in serve mode [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "u",
        "url",
        &format!("Page to read the closures from [Default: {DEFAULT_URL}]"),
        "URL",
    );
    opts.optopt(
        "s",
        "selector",
        &format!("CSS selector of the schedule on the page [Default: {DEFAULT_SELECTOR}]"),
        "SELECTOR",
    );
    opts.optopt(
        "o",
        "output",
        &format!("File to write the calendar to in write mode [Default: {DEFAULT_OUTPUT}]"),
        "PATH",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        &format!(
            "Time-to-live for the served calendar [Default: {}]",
            DEFAULT_TTL.as_secs()
        ),
        "SECONDS",
    );
    opts.optopt(
        "T",
        "timeout",
        &format!("Timeout for fetching the page [Default: {DEFAULT_TIMEOUT}]"),
        "SECONDS",
    );
    opts
}

fn usage(opts: &Options) -> String {
    let brief = format!("Usage: {} [OPTIONS] [write|serve]", env!("CARGO_PKG_NAME"));
    opts.usage(&brief)
}

/// `Ok(None)` means help was requested.
fn try_parse(opts: &Options, args: &[String]) -> Result<Option<Args>, String> {
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(None);
    }

    let mode = match matches.free.as_slice() {
        [] => Mode::Write,
        [mode] if mode == "write" => Mode::Write,
        [mode] if mode == "serve" => Mode::Serve,
        [mode] => return Err(format!("Unknown mode '{mode}', expected 'write' or 'serve'")),
        [_, extra, ..] => return Err(format!("Unexpected argument '{extra}'")),
    };

    let address = matches
        .opt_get_default("address", SocketAddr::from(([127, 0, 0, 1], 8080)))
        .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?;

    let url = matches
        .opt_str("url")
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let selector = matches
        .opt_str("selector")
        .unwrap_or_else(|| DEFAULT_SELECTOR.to_string());

    let output = matches
        .opt_str("output")
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from);

    let cache_ttl = matches
        .opt_get_default("cache-ttl", DEFAULT_TTL.as_secs())
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    let timeout = matches
        .opt_get_default("timeout", DEFAULT_TIMEOUT)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'timeout' is invalid: {err}"))?;

    Ok(Some(Args {
        mode,
        address,
        url,
        selector,
        output,
        cache_ttl,
        timeout,
    }))
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    match try_parse(&opts, &args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", usage(&opts));
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", opts.short_usage(env!("CARGO_PKG_NAME")));
            process::exit(1);
        }
    }
}
