//! Crate wide error types.
//!
//! Other modules `use errors::*;` to get the `Error`, `ErrorKind`, `ResultExt` and `Result`
//! types that `error_chain!` creates.

use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        TomlParse(::toml::de::Error);
        TomlSerialize(::toml::ser::Error);
        DocOptFailure(::docopt::Error);
    }

    errors {
        InvalidGridDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("Invalid grid dimensions {}x{}: both must be at least 1", width, height)
        }
        InvalidFloorDimensions(width: f32, depth: f32) {
            description("invalid floor dimensions")
            display("Invalid usable floor dimensions {}x{}: both must be positive", width, depth)
        }
        GridTooSmall(width: usize, height: usize) {
            description("grid too small for a maze")
            display("A {}x{} grid cannot hold distinct start and end cells", width, height)
        }
        InvalidGridSizeIndex(index: usize, count: usize) {
            description("invalid grid size index")
            display("Grid size index {} is invalid, there are {} grid sizes", index, count)
        }
        GemCountOutOfRange(count: usize, min: usize, max: usize) {
            description("gem count out of range")
            display("Gem count {} is outside the allowed range [{}, {}]", count, min, max)
        }
        NoActiveMaze {
            description("no active maze")
            display("There is no generated maze to reset")
        }
        InvalidConfig(reason: String) {
            description("invalid maze configuration")
            display("Invalid maze configuration: {}", reason)
        }
    }
}
