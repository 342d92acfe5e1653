pub mod image_sequence_sink;
pub mod reader_frame_source;
