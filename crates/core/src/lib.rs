pub mod keying;
pub mod pipeline;
pub mod playback;
pub mod shared;
pub mod video;
