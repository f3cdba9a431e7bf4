use crate::fixture::RequestFixture;
use crate::render::RenderedRequest;
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing::debug;
use xsbridge_core::config::BridgeConfig;
use xsbridge_core::ctx::RequestAssembler;

pub fn run(request: &Path, config: Option<&Path>) -> Result<()> {
    let cfg = match config {
        Some(path) => BridgeConfig::from_file(path)?,
        None => BridgeConfig::default(),
    };

    let raw = fs::read_to_string(request)
        .with_context(|| format!("failed to read request fixture {}", request.display()))?;
    let fixture: RequestFixture = serde_json::from_str(&raw)
        .with_context(|| format!("invalid request fixture {}", request.display()))?;

    debug!(fixture = %request.display(), method = %fixture.method, "loaded request fixture");

    let assembler = RequestAssembler::from_config(&cfg);
    let normalized = assembler
        .assemble(fixture.into_host_request()?)
        .map_err(|e| anyhow!("{} {}", e.status().as_u16(), e))?;

    let rendered = serde_json::to_string_pretty(&RenderedRequest::from(&normalized))?;
    println!("{rendered}");

    Ok(())
}
