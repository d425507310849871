//! Print the gesture guide.

use handmouse_common::config::AppConfig;
use handmouse_processing_core::instructions;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", instructions::TITLE);
    println!();
    for line in instructions::detailed_guide(&config.gestures) {
        println!("  {line}");
    }
    Ok(())
}
