//! Mention picker example.
//!
//! Drives a combobox the way an editor would when the user types `@` and
//! starts searching for a person, printing what a host would draw.
//!
//! Run with: cargo run -p lattice-combobox --example mention_picker
//! Set `RUST_LOG=lattice_combobox=trace` to see the widget's internals.

use lattice_combobox::prelude::*;
use tracing_subscriber::EnvFilter;

fn people() -> Vec<Suggestion> {
    [
        ("u1", "Ada Lovelace", None),
        ("u2", "Alan Turing", Some("Alan Turing (away)")),
        ("u3", "Alonzo Church", None),
        ("u4", "Barbara Liskov", None),
        ("u5", "Grace Hopper", None),
    ]
    .into_iter()
    .map(|(id, name, label)| {
        let suggestion = Suggestion::new(id, name).with_field("kind", "user");
        match label {
            Some(label) => suggestion.with_label(label),
            None => suggestion,
        }
    })
    .collect()
}

fn print_view(step: &str, view: &ComboboxView) {
    println!("-- {step}");
    println!("   input: {:?} (cursor {})", view.input.value, view.input.cursor);
    match &view.popover {
        Some(popover) => {
            println!(
                "   popover: {:?} at ({}, {}) {}x{}",
                popover.placement, popover.origin.x, popover.origin.y, popover.width, popover.height
            );
            for row in &popover.rows {
                let marker = if row.active { ">" } else { " " };
                println!("   {marker} {} [{}]", row.text, row.id);
            }
        }
        None => println!("   popover: hidden"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let layer = PortalLayer::new();
    let mut picker = Combobox::new("People", people())
        .with_label("Mention")
        .with_attributes(InputAttributes::new().with_placeholder("Search people…"))
        .with_portal(&layer);

    picker.on_change_input(|text| println!("   <- input changed: {text:?}"));
    picker.on_select_option(|option| {
        println!(
            "   <- selected {} ({})",
            option.id,
            serde_json::to_string(option).unwrap_or_default()
        );
    });

    let anchor = Rect::new(120.0, 80.0, 280.0, 32.0);
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

    picker.handle_event(&ComboboxEvent::Focus);
    picker.handle_event(&ComboboxEvent::text("al"));
    print_view("typed \"al\"", &picker.render(&anchor, viewport));

    picker.handle_event(&ComboboxEvent::Key(Key::ArrowDown));
    picker.handle_event(&ComboboxEvent::Key(Key::ArrowDown));
    print_view("moved down twice", &picker.render(&anchor, viewport));
    println!("   mounted popovers: {}", layer.len());

    picker.handle_event(&ComboboxEvent::Key(Key::Enter));
    print_view("pressed Enter", &picker.render(&anchor, viewport));
    println!("   mounted popovers: {}", layer.len());
}
