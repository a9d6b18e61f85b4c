//! Environment readiness check.

use crate::config::{SettleStrategy, ValidatorConfig, ENV_CHROMIUM_PATH};
use crate::renderer::chromium::find_chromium;
use anyhow::Result;

/// Report Chromium availability and the effective timing configuration.
pub async fn run(config: &ValidatorConfig) -> Result<()> {
    println!("PRD Validator Doctor");
    println!("====================");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    let chromium = match &config.browser.executable {
        Some(path) if path.exists() => Some(path.clone()),
        Some(path) => {
            println!("[!!] Configured Chromium does not exist: {}", path.display());
            None
        }
        None => find_chromium(),
    };
    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome/Chromium or set {ENV_CHROMIUM_PATH}."
        ),
    }

    match &config.settle {
        SettleStrategy::FixedDelay(delay) => {
            println!("[OK] Settle: fixed delay {}ms", delay.as_millis())
        }
        SettleStrategy::WaitForSelector { selector, timeout } => println!(
            "[OK] Settle: wait for `{selector}` (up to {}ms)",
            timeout.as_millis()
        ),
    }

    println!();
    if chromium.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
