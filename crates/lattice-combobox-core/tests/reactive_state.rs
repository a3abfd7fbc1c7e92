//! Integration tests for properties, memos and signals working together.

use std::sync::Arc;

use lattice_combobox_core::{Memo, Property, Signal};
use parking_lot::Mutex;

/// A miniature filter model wired the way widgets wire their state.
struct FilterModel {
    words: Property<Vec<String>>,
    needle: Property<String>,
    visible: Memo<(u64, u64), Vec<String>>,
    needle_changed: Signal<String>,
}

impl FilterModel {
    fn new(words: &[&str]) -> Self {
        Self {
            words: Property::new(words.iter().map(|w| w.to_string()).collect()),
            needle: Property::default(),
            visible: Memo::new(),
            needle_changed: Signal::new(),
        }
    }

    fn set_needle(&self, needle: &str) {
        if self.needle.set(needle.to_string()) {
            self.needle_changed.emit(needle.to_string());
        }
    }

    fn visible(&self) -> Vec<String> {
        let key = (self.words.revision(), self.needle.revision());
        self.visible.get_or_compute(key, || {
            let needle = self.needle.get();
            self.words.with(|words| {
                words
                    .iter()
                    .filter(|w| w.contains(needle.as_str()))
                    .cloned()
                    .collect()
            })
        })
    }
}

#[test]
fn derived_value_tracks_both_inputs() {
    let model = FilterModel::new(&["apple", "banana", "grape"]);
    assert_eq!(model.visible().len(), 3);

    model.set_needle("ap");
    assert_eq!(model.visible(), vec!["apple", "grape"]);

    model.words.set(vec!["papaya".to_string(), "kiwi".to_string()]);
    assert_eq!(model.visible(), vec!["papaya"]);
}

#[test]
fn signal_fires_once_per_distinct_change() {
    let model = FilterModel::new(&[]);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_clone = seen.clone();
    model.needle_changed.connect(move |text| {
        seen_clone.lock().push(text.clone());
    });

    model.set_needle("a");
    model.set_needle("a");
    model.set_needle("ab");

    assert_eq!(*seen.lock(), vec!["a".to_string(), "ab".to_string()]);
}
