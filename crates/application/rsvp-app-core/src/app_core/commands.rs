use rsvp_core::PrimaryIntent;

/// Registration form fields addressable by edit commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Company,
    Phone,
    Email,
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Flow
    Bootstrap,
    Register,
    Unregister,

    // Local edits
    DraftChanged(DraftField, String),
    EditName,
}

impl AppCommand {
    /// Command behind a primary intent. The host button and the in-page
    /// control both resolve through here, so they always trigger the same
    /// operation.
    pub fn for_intent(intent: PrimaryIntent) -> Self {
        match intent {
            PrimaryIntent::Refresh | PrimaryIntent::Retry => AppCommand::Bootstrap,
            PrimaryIntent::Register => AppCommand::Register,
            PrimaryIntent::Unregister => AppCommand::Unregister,
        }
    }
}
