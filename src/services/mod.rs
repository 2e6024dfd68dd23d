pub mod addon;
pub mod id_codec;
pub mod normalize;
pub mod providers;
