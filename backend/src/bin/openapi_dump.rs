//! Print the OpenAPI document as JSON, or YAML with `--yaml`.

use std::io::Write;

use user_directory::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let doc = ApiDoc::openapi();
    let rendered = if std::env::args().any(|arg| arg == "--yaml") {
        doc.to_yaml()?
    } else {
        doc.to_pretty_json()?
    };
    writeln!(std::io::stdout().lock(), "{rendered}")?;
    Ok(())
}
