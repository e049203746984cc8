pub mod handler;

pub use handler::{consume_completion_stream, StreamTurnOutput};
