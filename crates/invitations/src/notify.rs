use crate::invitation::Invitation;

/// External message delivery collaborator.
///
/// Invoked fire-and-forget after a successful ledger write; the ledger logs
/// the delivery count but never retries and never rolls back an invitation
/// on dispatch failure.
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver `message` to `recipient`, returning the number of messages
    /// successfully handed to the transport.
    fn send(&self, recipient: &str, message: &str) -> usize;
}

/// Dispatcher that only logs. Stands in for a mail transport in tests/dev.
#[derive(Debug, Default)]
pub struct LoggingDispatcher;

impl NotificationDispatcher for LoggingDispatcher {
    fn send(&self, recipient: &str, message: &str) -> usize {
        tracing::info!(%recipient, len = message.len(), "invitation message dispatched");
        1
    }
}

/// Render the invitation email body.
pub fn invitation_message(invitation: &Invitation, organization_name: &str) -> String {
    format!(
        "You are invited to join {organization} at {invite_time}.\n\
         \n\
         Follow this link to confirm join: {join_link}\n\
         \n\
         Requirements to accept the invitation:\n\
         \n\
         1. You should be authenticated on the website\n\
         2. You can accept the invitation only once\n\
         3. You should not be a member of the inviting organization\n\
         4. You should not be a representative of the inviting organization\n",
        organization = organization_name,
        invite_time = invitation.invite_time,
        join_link = invitation.join_url(),
    )
}
