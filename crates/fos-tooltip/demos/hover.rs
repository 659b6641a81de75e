//! Example: hover tooltips on a toolbar
//!
//! Run with `RUST_LOG=debug` to see the lifecycle and placement logs.

use fos_dom::{DOMRect, Document, Event, Size, StaticLayout};
use fos_html::inner_html;
use fos_tooltip::{Tooltip, TooltipConfig, TooltipOptions};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut document = Document::default();
    let body = document.body();
    let toolbar = document.create_element("nav");
    document.append_child(body, toolbar).unwrap();

    let save = document.create_element("button");
    let delete = document.create_element("button");
    document.append_child(toolbar, save).unwrap();
    document.append_child(toolbar, delete).unwrap();

    let mut layout = StaticLayout::new().with_class_size("tooltip", Size::new(160.0, 32.0));
    layout.set_rect(save, DOMRect::from_xywh(16.0, 8.0, 64.0, 24.0));
    layout.set_rect(delete, DOMRect::from_xywh(960.0, 740.0, 64.0, 24.0));
    document.set_layout(layout);

    let config = TooltipConfig {
        offset: 6.0,
        ..TooltipConfig::default()
    };

    // "mouseover" on each button
    let save_tip = Tooltip::new(
        &mut document,
        save,
        TooltipOptions::from_config(config.clone())
            .content("Save <kbd>Ctrl</kbd>+<kbd>S</kbd>")
            .on_close(|_, tip| println!("tooltip {} closed", tip.id())),
    );
    let delete_tip = Tooltip::new(
        &mut document,
        delete,
        TooltipOptions::from_config(config).content("Delete"),
    );

    for tip in [&save_tip, &delete_tip] {
        let placement = tip.position();
        let element = tip.element().unwrap();
        println!(
            "tooltip {} \"{}\": {:?} at ({}, {})",
            tip.id(),
            inner_html(&document, element),
            placement.side,
            placement.x,
            placement.y
        );
    }

    // Pointer leaves the save button
    document.dispatch_event(save, Event::new("mouseout"));
    println!("save tooltip open: {}", save_tip.is_open());

    // The delete button is removed from the toolbar
    document.remove(delete).unwrap();
    document.flush_mutations();
    println!("delete tooltip open: {}", delete_tip.is_open());

    Tooltip::close_all(&mut document);
}
