pub mod npy;

pub use npy::{ARRAY_EXTENSION, write_npy};
