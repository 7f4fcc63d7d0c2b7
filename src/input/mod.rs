mod reader;

pub use reader::{ImageReader, InputReader, MAX_IMAGE_SIZE, MAX_INPUT_SIZE};
