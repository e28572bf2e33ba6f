use std::fmt::Display;

use sdl2;

use crate::errors::*;

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub timer_subsystem: sdl2::TimerSubsystem,
    pub ttf_context: sdl2::ttf::Sdl2TtfContext,
}

/// SDL reports most failures as plain strings.
pub fn sdl_error<E: Display>(e: E) -> Error {
    ErrorKind::Sdl(e.to_string()).into()
}

pub fn init() -> Result<SdlSetup> {

    let sdl_context: sdl2::Sdl = sdl2::init().map_err(sdl_error)?;
    let video_subsystem: sdl2::VideoSubsystem = sdl_context.video().map_err(sdl_error)?;
    let timer_subsystem = sdl_context.timer().map_err(sdl_error)?;
    let ttf_context = sdl2::ttf::init()
        .map_err(sdl_error)
        .chain_err(|| "Failed to init true type fonts")?;

    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
        timer_subsystem,
        ttf_context,
    })
}
