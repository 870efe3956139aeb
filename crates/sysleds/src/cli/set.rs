//! `set` subcommand: open one light, apply a state, close it.

use super::{
    LightController, LightState, Options, Result, SetOutput, effective_config, led, print_json,
};
use sysleds_lib::FlashMode;

pub(super) fn cmd_set(
    opts: &Options,
    light: &str,
    color: &str,
    flash: &str,
    on_ms: i32,
    off_ms: i32,
) -> Result<()> {
    let config = effective_config(opts)?;
    let state = LightState {
        color: led::parse_color(color)?,
        flash_mode: flash.parse::<FlashMode>()?,
        flash_on_ms: on_ms,
        flash_off_ms: off_ms,
        ..LightState::default()
    };

    let controller = LightController::from_config(&config);
    let device = controller.open(light)?;
    device.set_light(&state)?;
    let id = device.id();
    device.close()?;

    if opts.json {
        return print_json(&SetOutput {
            light: id.to_string(),
            color: led::format_color(state.color),
            state,
            status: 0,
        });
    }

    let (on, off) = state.flash_timing();
    if on > 0 && off > 0 {
        println!(
            "{id}: {} ({} {on}/{off} ms)",
            led::format_color(state.color),
            state.flash_mode
        );
    } else {
        println!("{id}: {}", led::format_color(state.color));
    }
    Ok(())
}
