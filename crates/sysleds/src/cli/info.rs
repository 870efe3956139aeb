//! `info` subcommand: show the module descriptor.

use super::{InfoOutput, LightId, Result, kv, kv_width, print_json};
use sysleds_lib::LightsModule;

pub(super) fn cmd_info(json: bool) -> Result<()> {
    let info = *LightsModule.info();
    let lights: Vec<String> = LightId::ALL.iter().map(ToString::to_string).collect();

    if json {
        return print_json(&InfoOutput {
            module: info,
            lights,
        });
    }

    let w = kv_width(&["Module:", "Name:", "Author:", "Version:", "Lights:"], &[]);
    kv("Module:", info.id, w);
    kv("Name:", info.name, w);
    kv("Author:", info.author, w);
    kv("Version:", info.version(), w);
    kv("Lights:", lights.join(", "), w);
    Ok(())
}
