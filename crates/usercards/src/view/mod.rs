//! The rendered view: an element tree, the page skeleton, and the card
//! renderer.

pub mod card;
mod dom;
mod markup;
pub mod page;
mod selector;

pub use card::{
    append_card, attach_card_listeners, find_card, patch_card, render_card, rerender_all,
};
pub use dom::{Action, Document, Element, Event, NodeId, KEY_ATTRIBUTE};
pub use markup::{escape, Markup};
pub use page::{mount, RenderTargets};
pub use selector::Selector;
