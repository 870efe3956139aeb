//! `lights` subcommand: list light identifiers and their control files.

use super::{LightId, LightJson, LightsOutput, Options, Result, effective_config, print_json};

pub(super) fn cmd_lights(opts: &Options) -> Result<()> {
    let config = effective_config(opts)?;
    let root = &config.leds_root;

    let lights: Vec<LightJson> = LightId::ALL
        .iter()
        .map(|&id| LightJson {
            id: id.to_string(),
            files: id
                .control_files()
                .iter()
                .map(|f| root.join(f.relative_path()).display().to_string())
                .collect(),
        })
        .collect();

    if opts.json {
        return print_json(&LightsOutput {
            leds_root: root.display().to_string(),
            lights,
        });
    }

    for light in &lights {
        println!("{}", light.id);
        if light.files.is_empty() {
            println!("  (no control files)");
        }
        for file in &light.files {
            println!("  {file}");
        }
    }
    Ok(())
}
