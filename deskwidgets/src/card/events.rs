//! Card listeners.

use log::trace;
use widgetdom::{Document, Event, EventContext, EventKind, Key, ListenerId, Phase, ROOT_ID};

use super::ExpandableCard;

/// Attach the pointer and keyboard listeners of a freshly mounted card.
pub(super) fn attach(card: &ExpandableCard, doc: &Document) -> Vec<ListenerId> {
    let id = card.id().to_string();

    let weak = card.downgrade();
    let click = doc.add_listener(&id, EventKind::Click, Phase::Bubble, move |_cx| {
        if let Some(card) = ExpandableCard::upgrade(&weak) {
            card.drive(card.toggle());
        }
    });

    let weak = card.downgrade();
    let keydown = doc.add_listener(&id, EventKind::KeyDown, Phase::Bubble, move |cx| {
        if let Some(card) = ExpandableCard::upgrade(&weak) {
            on_key(&card, cx);
        }
    });

    // Clicks inside the content belong to the content, not the toggle.
    let content = doc.add_listener(
        card.content_id(),
        EventKind::Click,
        Phase::Bubble,
        |cx| cx.stop_propagation(),
    );

    vec![click, keydown, content]
}

fn on_key(card: &ExpandableCard, cx: &mut EventContext<'_>) {
    let Event::Key { key, modifiers, .. } = cx.event() else {
        return;
    };
    if !modifiers.none() {
        return;
    }
    match key {
        Key::Enter => {
            cx.prevent_default();
            card.drive(card.toggle());
        }
        key if key.is_space() => {
            cx.prevent_default();
            card.drive(card.toggle());
        }
        Key::Escape if card.is_expanded() => {
            card.collapse();
        }
        _ => {}
    }
}

/// Register the outside-click listener on the next tick.
///
/// Registering immediately would let the click that triggered the expansion
/// reach the new listener and collapse the card again.
pub(super) fn schedule_outside_listener(card: &ExpandableCard, doc: &Document, generation: u64) {
    let weak = card.downgrade();
    doc.defer(move |doc| {
        let Some(card) = ExpandableCard::upgrade(&weak) else {
            return;
        };
        card.install_outside_listener(generation, || {
            let weak = card.downgrade();
            doc.add_listener(ROOT_ID, EventKind::Click, Phase::Capture, move |cx| {
                if let Some(card) = ExpandableCard::upgrade(&weak) {
                    on_outside_click(&card, cx);
                }
            })
        });
    });
}

fn on_outside_click(card: &ExpandableCard, cx: &mut EventContext<'_>) {
    let doc = cx.document();
    if doc.contains(card.id(), cx.target()) {
        return;
    }
    // A hit-tested click may still land inside the card's bounds on an
    // overlapping node; an explicit target is trusted as is.
    let event = cx.event();
    let under_pointer = event.target().is_none()
        && event
            .position()
            .zip(doc.bounds(card.id()))
            .is_some_and(|((x, y), bounds)| bounds.contains(x, y));
    if under_pointer {
        return;
    }
    trace!("card {}: outside click on {}", card.id(), cx.target());
    card.collapse();
}
