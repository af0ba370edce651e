//! # Tile Forge Application (Binary)
//!
//! Main executable entry point.

fn main() -> std::process::ExitCode {
    tile_forge_app::main()
}
