//! The form controller: turns form submissions and card clicks into record
//! store mutations and incremental view updates.
//!
//! Every handler runs to completion against `&mut AppState`. Store mutation
//! happens first, then the view is patched, then the form is reset. A
//! persistence failure does not stop the view update; it is returned after
//! the view already reflects the in-memory state.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::form;
use crate::record::{Field, Record};
use crate::state::AppState;
use crate::view::{self, Action, Event, NodeId};

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record and card were created.
    Created {
        /// Key of the new record.
        email: String,
    },
    /// An existing record and its card were updated in place.
    Updated {
        /// Key of the updated record.
        email: String,
    },
    /// At least one field was empty; nothing was stored.
    Rejected {
        /// The empty fields, in form order.
        missing: Vec<Field>,
    },
}

/// Result of handling one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The form was submitted.
    Submitted(SubmitOutcome),
    /// A card's delete control was clicked.
    Deleted {
        /// The key carried by the control.
        email: String,
        /// Whether a record was actually removed.
        removed: bool,
    },
    /// A card's edit control was clicked.
    Edited {
        /// The key carried by the control.
        email: String,
        /// Whether the record was found and loaded into the form.
        loaded: bool,
    },
    /// Everything was erased.
    Cleared {
        /// Number of records dropped.
        removed: usize,
    },
    /// The click hit nothing actionable (dead node, no listener, no key).
    Ignored,
}

/// Submit the form: validate, then create or update.
///
/// # Errors
///
/// Returns [`Error::Persist`](crate::Error::Persist) if the store could not be
/// written. The record, the card and the form reset are applied regardless.
pub fn submit(state: &mut AppState) -> Result<SubmitOutcome> {
    let draft = form::read(&state.document, &state.targets);

    let missing = draft.missing_fields();
    if !missing.is_empty() {
        debug!(?missing, "Rejected submission with empty fields");
        form::reset(&mut state.document, &state.targets);
        return Ok(SubmitOutcome::Rejected { missing });
    }

    let email = draft.email.clone();
    let (outcome, persisted) = if state.store.contains(&email) {
        // The email is the key, so only the other three fields change
        let persisted = state.store.upsert(draft.clone()).map(|_| ());
        show_updated(state, &draft);
        info!(email = %email, "Updated user");
        (SubmitOutcome::Updated { email }, persisted)
    } else {
        let persisted = state.store.upsert(draft.clone()).map(|_| ());
        view::append_card(
            &mut state.document,
            state.targets.list,
            &draft,
            &state.labels,
        );
        info!(email = %email, "Created user");
        (SubmitOutcome::Created { email }, persisted)
    };

    form::reset(&mut state.document, &state.targets);
    debug!(records = ?state.store.records(), "Records after submit");

    persisted.map(|()| outcome)
}

/// Patch the card of an updated record, or render one if it went missing.
fn show_updated(state: &mut AppState, record: &Record) {
    let list = state.targets.list;
    let card = view::find_card(&state.document, list, &record.email);
    if let Some(card) = card {
        if view::patch_card(&mut state.document, card, record) {
            return;
        }
        state.document.remove(card);
    }
    warn!(email = %record.email, "No intact card for updated user, re-rendering it");
    view::append_card(&mut state.document, list, record, &state.labels);
}

/// Delete the record keyed `email` and remove its card.
///
/// Returns `true` if a record was removed. An unknown key removes nothing.
///
/// # Errors
///
/// Returns [`Error::Persist`](crate::Error::Persist) if the store could not be
/// written. The card is removed regardless.
pub fn delete(state: &mut AppState, email: &str) -> Result<bool> {
    info!(email, "Deleting user");
    let persisted = state.store.remove(email);

    if let Some(card) = view::find_card(&state.document, state.targets.list, email) {
        state.document.remove(card);
    }

    let removed = persisted?.is_some();
    if !removed {
        debug!(email, "No stored user to delete");
    }
    Ok(removed)
}

/// Load the record keyed `email` into the form for editing.
///
/// Any draft in the form is overwritten. Returns `false` and leaves the form
/// untouched if no such record exists.
pub fn edit(state: &mut AppState, email: &str) -> bool {
    info!(email, "Editing user");
    let Some(record) = state.store.get(email) else {
        debug!(email, "No stored user to edit");
        return false;
    };
    let record = record.clone();
    form::fill(&mut state.document, &state.targets, &record);
    true
}

/// Erase every record and the persisted snapshot, then rebuild the view
/// from the empty store.
///
/// Returns the number of records dropped.
///
/// # Errors
///
/// Returns [`Error::Persist`](crate::Error::Persist) if the snapshot could not
/// be erased. Memory and view are emptied regardless.
pub fn clear_all(state: &mut AppState) -> Result<usize> {
    let removed = state.store.len();
    let cleared = state.store.clear();

    view::rerender_all(
        &mut state.document,
        state.targets.list,
        state.store.records(),
        &state.labels,
    );
    form::reset(&mut state.document, &state.targets);
    info!(removed, "Cleared all users");

    cleared.map(|()| removed)
}

/// Route a dispatched click to its handler, passing the record key along.
///
/// # Errors
///
/// Propagates persistence errors from the handlers.
pub fn dispatch(state: &mut AppState, event: Event) -> Result<Outcome> {
    match (event.action, event.key) {
        (Action::Submit, _) => submit(state).map(Outcome::Submitted),
        (Action::ClearAll, _) => clear_all(state).map(|removed| Outcome::Cleared { removed }),
        (Action::DeleteCard, Some(email)) => {
            let removed = delete(state, &email)?;
            Ok(Outcome::Deleted { email, removed })
        }
        (Action::EditCard, Some(email)) => {
            let loaded = edit(state, &email);
            Ok(Outcome::Edited { email, loaded })
        }
        (action @ (Action::DeleteCard | Action::EditCard), None) => {
            warn!(%action, node = %event.target, "Card control without a key");
            Ok(Outcome::Ignored)
        }
    }
}

/// Click `node` and handle whatever it triggers.
///
/// # Errors
///
/// Propagates persistence errors from the handlers.
pub fn click(state: &mut AppState, node: NodeId) -> Result<Outcome> {
    match state.document.click(node) {
        Some(event) => dispatch(state, event),
        None => {
            debug!(%node, "Click on a node without a live listener");
            Ok(Outcome::Ignored)
        }
    }
}
