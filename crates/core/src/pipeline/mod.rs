pub mod key_image_use_case;
pub mod key_video_use_case;
pub mod pipeline_logger;
