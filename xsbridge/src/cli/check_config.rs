use anyhow::Result;
use std::path::Path;
use xsbridge_core::config::BridgeConfig;

pub fn run(path: &Path) -> Result<()> {
    let cfg = BridgeConfig::from_file(path)?;

    println!("✔ Config loaded successfully");
    println!("✔ script extension {}", cfg.request.script_extension);
    println!(
        "✔ multipart limits: {} parts, nesting depth {}",
        cfg.multipart.max_parts, cfg.multipart.max_nesting_depth
    );
    match &cfg.jobs {
        Some(jobs) => println!(
            "✔ {} jobs ({} active)",
            jobs.jobs.len(),
            jobs.jobs.iter().filter(|j| j.active).count()
        ),
        None => println!("✔ jobs disabled"),
    }

    Ok(())
}
