//! Print the OpenAPI document as JSON.

use color_eyre::eyre::{Context, Result};
use utoipa::OpenApi;
use workasana::doc::ApiDoc;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialise OpenAPI document")?;
    println!("{document}");
    Ok(())
}
