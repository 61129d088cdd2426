pub mod canvas;
pub mod lab_icon;
pub mod manifest;
pub mod output;
pub mod resize;
pub mod sizes;
