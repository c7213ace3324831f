use std::{fs, time::Instant};

use screengrab::{Display, Rect, capture_rect, capture_screen};

fn main() {
    let start = Instant::now();

    fs::create_dir_all("target/screenshots").unwrap();

    for display in Display::all().unwrap() {
        let image = display.capture_image().unwrap();
        image
            .save(format!("target/screenshots/display-{}.png", display.id()))
            .unwrap();
    }

    let screen = capture_screen().unwrap();
    screen.save("target/screenshots/virtual-screen.png").unwrap();

    let region = capture_rect(Rect::new(0, 0, 400, 300)).unwrap();
    region.save("target/screenshots/region.png").unwrap();

    println!("took: {:?}", start.elapsed());
}
