// Main entry point that forwards to the tile-forge-app binary
fn main() -> std::process::ExitCode {
    // Exit with the same code as the app
    tile_forge_app::main()
}
