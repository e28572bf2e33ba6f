// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at them.
use error_chain::error_chain;

error_chain! {
    errors {
        InvalidGeometry(window_width: u32, window_height: u32, cell_pixels: u32) {
            description("window geometry cannot hold a maze")
            display("a {}x{} pixel window with {} pixel cells does not fit a maze of at least 2x2 cells",
                    window_width, window_height, cell_pixels)
        }

        Sdl(message: String) {
            description("SDL failure")
            display("SDL failure: {}", message)
        }
    }
}
