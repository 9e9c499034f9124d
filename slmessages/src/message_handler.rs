use crate::MessageRecord;


/// Trait for components that consume capture records
/// 
/// Every decoded record is offered to every handler; implementations look at
/// the source and channel and ignore what they are not interested in.
pub trait MessageHandler {
    /// Process one decoded record
    fn handle_message(&mut self, record: &MessageRecord);
}
