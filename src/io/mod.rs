pub mod matrix_reader;
pub use matrix_reader::{MatrixReader, ReadError};
pub mod tour_writer;
pub use tour_writer::TourWriter;
