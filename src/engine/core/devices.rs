// Render device filtering and preference order

use std::cmp::Ordering;

const CARD_PREFIX: &str = "card";
const RENDER_PREFIX: &str = "renderD";

fn device_class(name: &str) -> Option<u8> {
    if name.starts_with(CARD_PREFIX) {
        Some(0)
    } else if name.starts_with(RENDER_PREFIX) {
        Some(1)
    } else {
        None
    }
}

/// Keep DRI card/render nodes and order them by preference.
///
/// Card nodes come before render nodes. Within a class the order is reverse
/// lexicographic, so on multi-GPU hosts the higher-numbered node (usually the
/// discrete GPU) is tried first. Anything else is dropped without error.
pub fn select_devices<S: AsRef<str>>(devices: &[S]) -> Vec<String> {
    let mut selected: Vec<(u8, &str)> = devices
        .iter()
        .map(|device| device.as_ref())
        .filter_map(|name| device_class(name).map(|class| (class, name)))
        .collect();

    selected.sort_by(|(class_a, a), (class_b, b)| match class_a.cmp(class_b) {
        Ordering::Equal => b.cmp(a),
        other => other,
    });

    selected.into_iter().map(|(_, name)| name.to_string()).collect()
}
