//! The page skeleton: form, clear-all button and card list.

use super::dom::{Action, Document, NodeId};
use super::markup::Markup;
use super::selector::Selector;
use crate::error::{Error, Result};
use crate::record::Field;

/// Id of the form element.
pub const FORM_ID: &str = "user-form";
/// Class of the add/submit button.
pub const ADD_CLASS: &str = "add";
/// Class of the clear-all button.
pub const CLEAR_CLASS: &str = "clear";
/// Class of the card list container.
pub const LIST_CLASS: &str = "users";

/// Handles to the elements the controller works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargets {
    /// The form element.
    pub form: NodeId,
    /// The four inputs, in [`Field::ALL`] order.
    pub inputs: [NodeId; 4],
    /// The add/submit button.
    pub add_button: NodeId,
    /// The clear-all button.
    pub clear_button: NodeId,
    /// The card list container.
    pub list: NodeId,
}

impl RenderTargets {
    /// The input bound to `field`.
    #[must_use]
    pub fn input(&self, field: Field) -> NodeId {
        let index = Field::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        self.inputs[index]
    }
}

/// Human-readable label of a form field.
#[must_use]
pub fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "Name",
        Field::SecondName => "Second name",
        Field::DateOfBirth => "Date of birth",
        Field::Email => "Email",
    }
}

/// The static page markup.
#[must_use]
pub fn page_markup() -> Markup {
    let mut form = Markup::new("form").id(FORM_ID);
    for field in Field::ALL {
        form = form.child(
            Markup::new("label")
                .attr("for", field.key())
                .text(field_label(field)),
        );
        form = form.child(
            Markup::new("input")
                .id(field.key())
                .attr("type", "text")
                .attr("name", field.key()),
        );
    }
    form = form.child(Markup::new("button").class(ADD_CLASS).text("Add"));

    Markup::new("main")
        .child(form)
        .child(Markup::new("button").class(CLEAR_CLASS).text("Clear all"))
        .child(Markup::new("div").class(LIST_CLASS))
}

/// Inject the page skeleton into `doc`, bind the form-level listeners and
/// return the render targets.
///
/// # Errors
///
/// Returns [`Error::MissingElement`] if the skeleton lacks a required element.
pub fn mount(doc: &mut Document) -> Result<RenderTargets> {
    let root = doc.root();
    doc.inject(root, &page_markup());
    let targets = locate(doc)?;

    doc.add_listener(targets.add_button, Action::Submit);
    doc.add_listener(targets.clear_button, Action::ClearAll);
    Ok(targets)
}

/// Find the render targets in an already-built document.
///
/// # Errors
///
/// Returns [`Error::MissingElement`] naming the first selector that matched
/// nothing.
pub fn locate(doc: &Document) -> Result<RenderTargets> {
    let root = doc.root();
    let find = |selector: Selector| {
        doc.query(root, &selector)
            .ok_or_else(|| Error::missing_element(selector.to_string()))
    };

    let form = find(Selector::id(FORM_ID))?;
    let mut inputs = [root; 4];
    for (slot, field) in inputs.iter_mut().zip(Field::ALL) {
        *slot = find(Selector::id(field.key()))?;
    }

    Ok(RenderTargets {
        form,
        inputs,
        add_button: find(Selector::class(ADD_CLASS))?,
        clear_button: find(Selector::class(CLEAR_CLASS))?,
        list: find(Selector::class(LIST_CLASS))?,
    })
}
