//! Print the OpenAPI document as JSON, or YAML with `--yaml`.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use users_api::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the Users API OpenAPI document")]
struct Args {
    /// Emit YAML instead of pretty-printed JSON.
    #[arg(long)]
    yaml: bool,
}

fn render(yaml: bool) -> Result<String, String> {
    let doc = ApiDoc::openapi();
    if yaml {
        doc.to_yaml().map_err(|err| err.to_string())
    } else {
        doc.to_pretty_json().map_err(|err| err.to_string())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match render(args.yaml) {
        Ok(document) => {
            let mut stdout = std::io::stdout().lock();
            if writeln!(stdout, "{document}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to render OpenAPI document: {err}");
            ExitCode::FAILURE
        }
    }
}
