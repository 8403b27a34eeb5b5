//! The incident report modal.
//!
//! The modal collects a title, an optional description and an urgency, and
//! carries the originating channel as private metadata so the submission
//! can be attributed back to it.

use incident_bridge_core::{ChannelContext, Urgency};

use super::types::{Block, InputElement, ModalView, OptionObject, PlainText};

/// Callback ID identifying submissions of the incident modal.
pub const INCIDENT_CALLBACK_ID: &str = "incident_modal";

pub const TITLE_BLOCK_ID: &str = "title_block";
pub const TITLE_ACTION_ID: &str = "title";
pub const DESCRIPTION_BLOCK_ID: &str = "description_block";
pub const DESCRIPTION_ACTION_ID: &str = "description";
pub const URGENCY_BLOCK_ID: &str = "urgency_block";
pub const URGENCY_ACTION_ID: &str = "urgency";

/// Build the incident report modal for a command run in `context`.
#[must_use]
pub fn build_incident_modal(context: &ChannelContext) -> ModalView {
    let options: Vec<OptionObject> = Urgency::ALL
        .into_iter()
        .map(urgency_option)
        .collect();

    ModalView {
        view_type: "modal",
        callback_id: INCIDENT_CALLBACK_ID.to_string(),
        title: PlainText::new("Create Incident"),
        submit: PlainText::new("Create"),
        close: PlainText::new("Cancel"),
        blocks: vec![
            Block::Input {
                block_id: TITLE_BLOCK_ID.to_string(),
                label: PlainText::new("Title"),
                element: InputElement::PlainTextInput {
                    action_id: TITLE_ACTION_ID.to_string(),
                    multiline: false,
                    placeholder: Some(PlainText::new("Enter incident title")),
                },
                optional: false,
            },
            Block::Input {
                block_id: DESCRIPTION_BLOCK_ID.to_string(),
                label: PlainText::new("Description"),
                element: InputElement::PlainTextInput {
                    action_id: DESCRIPTION_ACTION_ID.to_string(),
                    multiline: true,
                    placeholder: Some(PlainText::new("Describe the incident")),
                },
                optional: true,
            },
            Block::Input {
                block_id: URGENCY_BLOCK_ID.to_string(),
                label: PlainText::new("Urgency"),
                element: InputElement::StaticSelect {
                    action_id: URGENCY_ACTION_ID.to_string(),
                    placeholder: Some(PlainText::new("Select urgency level")),
                    options,
                    initial_option: Some(urgency_option(Urgency::default())),
                },
                optional: false,
            },
        ],
        private_metadata: context.to_metadata(),
        clear_on_close: true,
        notify_on_close: false,
    }
}

fn urgency_option(urgency: Urgency) -> OptionObject {
    OptionObject::new(urgency.label(), urgency.as_str())
}
