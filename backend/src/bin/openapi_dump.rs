//! Write the OpenAPI document to stdout as pretty-printed JSON.
//!
//! Usage: `cargo run --bin openapi-dump > openapi.json`

use std::io::{self, Write};
use std::process::ExitCode;

use characters::ApiDoc;
use utoipa::OpenApi;

fn dump(out: &mut impl Write) -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;
    writeln!(out, "{json}")
}

fn main() -> ExitCode {
    match dump(&mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing sensible to do if stderr is gone too.
            if writeln!(io::stderr(), "openapi-dump: {err}").is_err() {
                return ExitCode::from(2);
            }
            ExitCode::FAILURE
        }
    }
}
