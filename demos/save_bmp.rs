use std::fs;

use screengrab::{Rect, save_rect_to_bmp, save_screen_to_bmp};

fn main() {
    fs::create_dir_all("target/screenshots").unwrap();

    save_screen_to_bmp("target/screenshots/screen.bmp").unwrap();
    save_rect_to_bmp("target/screenshots/region.bmp", Rect::new(0, 0, 200, 100)).unwrap();

    println!("saved target/screenshots/screen.bmp and region.bmp");
}
