use std::time::Instant;

use screengrab::{Display, virtual_screen_rect};

fn main() {
    let start = Instant::now();
    let displays = Display::all().unwrap();
    println!("Display::all() took: {:?}", start.elapsed());

    for display in &displays {
        println!(
            "Display: {} {} {} primary: {}",
            display.id(),
            display.name(),
            display.rect(),
            display.is_primary()
        );
    }

    println!("virtual screen: {}", virtual_screen_rect().unwrap());

    let display = Display::from_point(100, 100).unwrap();
    println!("Display::from_point(100, 100): {}", display.name());
}
