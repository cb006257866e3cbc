mod field;
mod image;
mod table;

pub use field::{draw_field, draw_fields};
pub use image::{aspect_fit, draw_image_block};
pub use table::draw_table;
