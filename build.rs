use std::env;

fn main() {

    // Unix family systems are assumed to have the SDL development libraries
    // installed by the package manager. Windows builds with the screen
    // feature look for the C built sdl2 libraries in ./sdl_libs, or wherever
    // SDL_LIBS_DIR points. `cargo run` also picks up sdl2 dlls from there.
    let wants_screen = env::var("CARGO_FEATURE_SCREEN").is_ok();
    if wants_screen && cfg!(target_family = "windows") {

        let libs_dir = env::var("SDL_LIBS_DIR").ok().or_else(|| {
            env::var("CARGO_MANIFEST_DIR")
                .ok()
                .map(|cargo_root_dir| format!("{}/sdl_libs", cargo_root_dir))
        });

        if let Some(libs) = libs_dir {
            println!("cargo:rustc-flags=-L {}", libs);
        }
    }
}
