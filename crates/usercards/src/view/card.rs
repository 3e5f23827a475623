//! Card rendering: one record to one card, and the list rebuild.

use tracing::{debug, info};

use super::dom::{Action, Document, NodeId, KEY_ATTRIBUTE};
use super::markup::Markup;
use super::selector::Selector;
use crate::config::RenderConfig;
use crate::record::Record;
use crate::store::Records;

/// Class of a card container.
pub const CARD_CLASS: &str = "user";
/// Class of the block holding the four field paragraphs.
pub const INFO_CLASS: &str = "user-info";
/// Class of the delete control.
pub const DELETE_CLASS: &str = "delete";
/// Class of the edit control.
pub const EDIT_CLASS: &str = "change";

/// Render one record as a card fragment.
///
/// The container and both controls carry the record's email under
/// [`KEY_ATTRIBUTE`].
#[must_use]
pub fn render_card(record: &Record, labels: &RenderConfig) -> Markup {
    let info = Markup::new("div")
        .class(INFO_CLASS)
        .child(Markup::new("p").text(&record.name))
        .child(Markup::new("p").text(&record.second_name))
        .child(Markup::new("p").text(&record.date_of_birth))
        .child(Markup::new("p").class("email").text(&record.email));

    let menu = Markup::new("div")
        .class("menu")
        .child(
            Markup::new("button")
                .class(DELETE_CLASS)
                .attr(KEY_ATTRIBUTE, &record.email)
                .text(&labels.delete_label),
        )
        .child(
            Markup::new("button")
                .class(EDIT_CLASS)
                .attr(KEY_ATTRIBUTE, &record.email)
                .text(&labels.edit_label),
        );

    Markup::new("div")
        .class(CARD_CLASS)
        .attr(KEY_ATTRIBUTE, &record.email)
        .child(info)
        .child(menu)
}

/// Bind the delete and edit actions to a card's controls.
///
/// Returns `false` if either control is missing.
pub fn attach_card_listeners(doc: &mut Document, card: NodeId) -> bool {
    let delete = doc.query(card, &Selector::class(DELETE_CLASS));
    let edit = doc.query(card, &Selector::class(EDIT_CLASS));
    match (delete, edit) {
        (Some(delete), Some(edit)) => {
            doc.add_listener(delete, Action::DeleteCard) && doc.add_listener(edit, Action::EditCard)
        }
        _ => false,
    }
}

/// Render `record`, append the card to `list` and wire its listeners.
pub fn append_card(
    doc: &mut Document,
    list: NodeId,
    record: &Record,
    labels: &RenderConfig,
) -> NodeId {
    let card = doc.inject(list, &render_card(record, labels));
    attach_card_listeners(doc, card);
    card
}

/// Clear `list` and render one card per record, in mapping order.
pub fn rerender_all(
    doc: &mut Document,
    list: NodeId,
    records: &Records,
    labels: &RenderConfig,
) -> Vec<NodeId> {
    doc.clear_children(list);

    if records.is_empty() {
        info!("Storage is empty, nothing to render");
        return Vec::new();
    }

    let cards: Vec<NodeId> = records
        .values()
        .map(|record| append_card(doc, list, record, labels))
        .collect();
    debug!(cards = cards.len(), "Rendered all cards");
    cards
}

/// Find the card in `list` tagged with `email`.
#[must_use]
pub fn find_card(doc: &Document, list: NodeId, email: &str) -> Option<NodeId> {
    doc.children(list)
        .iter()
        .copied()
        .find(|card| doc.attribute(*card, KEY_ATTRIBUTE) == Some(email))
}

/// The card control bound to `action`, if the card has one.
#[must_use]
pub fn card_control(doc: &Document, card: NodeId, action: Action) -> Option<NodeId> {
    let class = match action {
        Action::DeleteCard => DELETE_CLASS,
        Action::EditCard => EDIT_CLASS,
        Action::Submit | Action::ClearAll => return None,
    };
    doc.query(card, &Selector::class(class))
}

/// Rewrite the name, second name and date of birth shown on `card`.
///
/// The email paragraph is left alone; it is the card's key. Returns `false`
/// if the card does not have the expected structure.
pub fn patch_card(doc: &mut Document, card: NodeId, record: &Record) -> bool {
    let Some(info) = doc.query(card, &Selector::class(INFO_CLASS)) else {
        return false;
    };
    let paragraphs = doc.children(info).to_vec();
    if paragraphs.len() < 3 {
        return false;
    }

    doc.set_text(paragraphs[0], &record.name);
    doc.set_text(paragraphs[1], &record.second_name);
    doc.set_text(paragraphs[2], &record.date_of_birth);
    true
}

/// Read back the four values a card displays.
#[must_use]
pub fn displayed_record(doc: &Document, card: NodeId) -> Option<Record> {
    let info = doc.query(card, &Selector::class(INFO_CLASS))?;
    let texts: Vec<String> = doc
        .children(info)
        .iter()
        .map(|p| doc.text(*p).unwrap_or_default().to_string())
        .collect();
    let values: [String; 4] = texts.try_into().ok()?;
    Some(Record::from_values(values))
}
