pub mod describe;
pub mod time_slider;
