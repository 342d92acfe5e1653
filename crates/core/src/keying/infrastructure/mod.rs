pub mod alpha_box_blur;
pub mod chroma_key_effect;
pub mod effect_factory;
pub mod hue_keyer;
